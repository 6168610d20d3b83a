use crate::extractor::MatchSummary;

/// Shown wherever a field did not resolve.
pub const DISPLAY_PLACEHOLDER: &str = "N/A";

pub fn display_or_na(field: &Option<String>) -> &str {
    field
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(DISPLAY_PLACEHOLDER)
}

/// Plain-text block for the console variant.
pub fn format_console(summary: &MatchSummary) -> String {
    let mut output = String::new();

    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Match:  {}\n", display_or_na(&summary.title)));
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!("Score 1: {}\n", display_or_na(&summary.score1)));
    output.push_str(&format!("Score 2: {}\n", display_or_na(&summary.score2)));
    output.push_str(&format!("Status:  {}\n", display_or_na(&summary.status)));

    push_player_list(&mut output, "Batsmen", &summary.batsmen);
    push_player_list(&mut output, "Bowlers", &summary.bowlers);

    output.push_str(&format!(
        "Recent Overs: {}\n",
        display_or_na(&summary.recent_overs)
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    output
}

fn push_player_list(output: &mut String, label: &str, entries: &[String]) {
    output.push_str(&format!("{}:\n", label));
    if entries.is_empty() {
        output.push_str(&format!("  - {}\n", DISPLAY_PLACEHOLDER));
    } else {
        for entry in entries {
            output.push_str(&format!("  - {}\n", entry));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> MatchSummary {
        MatchSummary {
            title: Some("India vs Australia, 3rd ODI".to_string()),
            score1: Some("IND 152/3 (42.5)".to_string()),
            score2: None,
            status: Some("India need 54 runs in 43 balls".to_string()),
            batsmen: vec!["Virat Kohli*: 54 (39)".to_string()],
            bowlers: vec![],
            recent_overs: None,
        }
    }

    #[test]
    fn test_display_or_na() {
        assert_eq!(display_or_na(&Some("IND 152/3".to_string())), "IND 152/3");
        assert_eq!(display_or_na(&None), DISPLAY_PLACEHOLDER);
        assert_eq!(display_or_na(&Some(String::new())), DISPLAY_PLACEHOLDER);
    }

    #[test]
    fn test_format_console_substitutes_placeholder() {
        let text = format_console(&summary());
        assert!(text.contains("Match:  India vs Australia, 3rd ODI"));
        assert!(text.contains("Score 1: IND 152/3 (42.5)"));
        assert!(text.contains("Score 2: N/A"));
        assert!(text.contains("Recent Overs: N/A"));
    }

    #[test]
    fn test_format_console_lists_players() {
        let text = format_console(&summary());
        assert!(text.contains("  - Virat Kohli*: 54 (39)"));
        // Empty bowler list still renders a placeholder row.
        assert!(text.contains("Bowlers:\n  - N/A"));
    }
}
