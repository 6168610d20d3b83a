use actix_web::{web, HttpResponse, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::config::ScraperConfig;
use crate::extract_score_from_url;
use crate::extractor::MatchSummary;

#[derive(Clone)]
pub struct AppState {
    pub history: Arc<Mutex<Vec<ScoreResponse>>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub message: String,
    pub url: String,
    pub fetched_at: String,
    pub data: Option<MatchSummary>,
}

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cricket-score-scraper"
    })))
}

pub async fn score_handler(
    state: web::Data<AppState>,
    config: web::Data<ScraperConfig>,
    req: web::Json<ScoreRequest>,
) -> Result<HttpResponse> {
    log::info!("Received score request for: {}", req.url);

    let fetched_at = Local::now().to_rfc3339();

    let response = match extract_score_from_url(&config, &req.url).await {
        Ok(summary) => {
            log::info!(
                "Extraction complete: status={:?}, score1={:?}",
                summary.status,
                summary.score1
            );
            ScoreResponse {
                success: true,
                message: "Score extracted successfully".to_string(),
                url: req.url.clone(),
                fetched_at,
                data: Some(summary),
            }
        }
        Err(e) => {
            log::error!("Score lookup failed for {}: {}", req.url, e);
            ScoreResponse {
                success: false,
                message: e.to_string(),
                url: req.url.clone(),
                fetched_at,
                data: None,
            }
        }
    };

    state.history.lock().unwrap().push(response.clone());

    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_history(state: web::Data<AppState>) -> Result<HttpResponse> {
    let history = state.history.lock().unwrap();
    Ok(HttpResponse::Ok().json(&*history))
}

pub async fn clear_history(state: web::Data<AppState>) -> Result<HttpResponse> {
    state.history.lock().unwrap().clear();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "History cleared"
    })))
}

pub async fn index() -> Result<HttpResponse> {
    let html = r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Cricket Score Scraper</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #1e5128 0%, #4e9f3d 100%);
            min-height: 100vh;
            padding: 20px;
        }
        .container {
            max-width: 800px;
            margin: 0 auto;
            background: white;
            border-radius: 20px;
            padding: 40px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3);
        }
        h1 { color: #1e5128; margin-bottom: 10px; font-size: 2.2em; }
        .subtitle { color: #666; margin-bottom: 30px; font-size: 1.05em; }
        label { display: block; margin-bottom: 8px; color: #333; font-weight: 600; }
        input[type="text"] {
            width: 100%;
            padding: 12px 15px;
            border: 2px solid #ddd;
            border-radius: 8px;
            font-size: 16px;
            margin-bottom: 20px;
        }
        input:focus { outline: none; border-color: #4e9f3d; }
        .btn {
            background: linear-gradient(135deg, #1e5128 0%, #4e9f3d 100%);
            color: white;
            padding: 14px 30px;
            border: none;
            border-radius: 8px;
            font-size: 17px;
            font-weight: 600;
            cursor: pointer;
            width: 100%;
        }
        .btn:disabled { opacity: 0.6; cursor: not-allowed; }
        .error {
            display: none;
            margin-top: 20px;
            padding: 15px;
            border-radius: 8px;
            background: #f8d7da;
            color: #721c24;
            border: 1px solid #f5c6cb;
        }
        .error.show { display: block; }
        .result { display: none; margin-top: 30px; }
        .result.show { display: block; }
        .result h2 { color: #1e5128; margin-bottom: 15px; }
        .field {
            background: #f8f9fa;
            padding: 12px 15px;
            border-radius: 8px;
            margin-bottom: 10px;
            border-left: 4px solid #4e9f3d;
        }
        .field-label { color: #666; font-size: 0.85em; margin-bottom: 3px; }
        .field-value { color: #333; font-size: 1.1em; font-weight: 600; }
        .field-value ul { margin-left: 20px; font-weight: 400; }
        .note { margin-top: 20px; color: #888; font-size: 0.85em; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Cricket Score Scraper</h1>
        <p class="subtitle">Enter the full URL of a Cricbuzz match page
            (e.g. https://www.cricbuzz.com/live-cricket-scores/...)</p>

        <form id="scoreForm">
            <label for="url">Match URL</label>
            <input type="text" id="url" name="url"
                placeholder="https://www.cricbuzz.com/live-cricket-scores/..." required>
            <button type="submit" class="btn" id="scoreBtn">Get Score</button>
        </form>

        <div class="error" id="error"></div>

        <div class="result" id="result">
            <h2 id="matchTitle"></h2>
            <div class="field">
                <div class="field-label">Score 1</div>
                <div class="field-value" id="score1"></div>
            </div>
            <div class="field">
                <div class="field-label">Score 2</div>
                <div class="field-value" id="score2"></div>
            </div>
            <div class="field">
                <div class="field-label">Status</div>
                <div class="field-value" id="status"></div>
            </div>
            <div class="field">
                <div class="field-label">Batsmen</div>
                <div class="field-value"><ul id="batsmen"></ul></div>
            </div>
            <div class="field">
                <div class="field-label">Bowlers</div>
                <div class="field-value"><ul id="bowlers"></ul></div>
            </div>
            <div class="field">
                <div class="field-label">Recent Overs</div>
                <div class="field-value" id="recentOvers"></div>
            </div>
            <p class="note">Scraped data depends on Cricbuzz's current HTML
                structure and may break if they change it.</p>
        </div>
    </div>

    <script>
        const form = document.getElementById('scoreForm');
        const errorDiv = document.getElementById('error');
        const resultDiv = document.getElementById('result');
        const scoreBtn = document.getElementById('scoreBtn');

        const orNA = (value) => value ? value : 'N/A';

        function fillList(id, entries) {
            const list = document.getElementById(id);
            list.innerHTML = '';
            const items = entries && entries.length ? entries : ['N/A'];
            for (const entry of items) {
                const li = document.createElement('li');
                li.textContent = entry;
                list.appendChild(li);
            }
        }

        form.addEventListener('submit', async (e) => {
            e.preventDefault();

            errorDiv.className = 'error';
            resultDiv.className = 'result';
            scoreBtn.disabled = true;

            try {
                const response = await fetch('/api/score', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ url: document.getElementById('url').value })
                });
                const body = await response.json();

                if (body.success && body.data) {
                    const data = body.data;
                    document.getElementById('matchTitle').textContent = orNA(data.title);
                    document.getElementById('score1').textContent = orNA(data.score1);
                    document.getElementById('score2').textContent = orNA(data.score2);
                    document.getElementById('status').textContent = orNA(data.status);
                    fillList('batsmen', data.batsmen);
                    fillList('bowlers', data.bowlers);
                    document.getElementById('recentOvers').textContent = orNA(data.recent_overs);
                    resultDiv.className = 'result show';
                } else {
                    errorDiv.textContent = 'Error: ' + body.message;
                    errorDiv.className = 'error show';
                }
            } catch (err) {
                errorDiv.textContent = 'Error: ' + err.message;
                errorDiv.className = 'error show';
            } finally {
                scoreBtn.disabled = false;
            }
        });
    </script>
</body>
</html>
"##;

    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
