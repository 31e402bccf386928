use actix_web::{web, HttpResponse};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::{self, PerformanceChart};
use crate::chat::{self, ChatReply, ChatRequest};
use crate::progress;
use crate::records::{
    sanitize_activity, sanitize_performance, ActivityKind, DailyActivityRecord, PerformanceRecord,
};
use crate::store::SnapshotStore;

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/// Everything the progress page needs for one (classroom, year) in a
/// single payload.
#[derive(Debug, Serialize)]
pub struct ProgressDashboard {
    pub classroom: String,
    pub year: i32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub active_days: usize,
    pub practice_total: i64,
    pub exam_total: i64,
    pub best_performance: Option<PerformanceRecord>,
    pub trend: String,
    pub chart: PerformanceChart,
    pub heatmap: Vec<DailyActivityRecord>,
}

/// Echoed back on snapshot ingest so callers can see how many rows the
/// best-effort sanitization dropped.
#[derive(Debug, Serialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub dropped: usize,
}

pub fn build_dashboard(
    store: &SnapshotStore,
    classroom: &str,
    year: i32,
    today: NaiveDate,
) -> ProgressDashboard {
    let practice = store.activity(classroom, year, ActivityKind::Practice);
    let exams = store.activity(classroom, year, ActivityKind::Exam);
    let scores = store.performance(classroom, year);

    ProgressDashboard {
        classroom: classroom.to_string(),
        year,
        current_streak: progress::current_streak(&practice, today),
        longest_streak: progress::longest_streak(&practice),
        active_days: progress::active_day_count(&practice),
        practice_total: progress::total_activity(&practice),
        exam_total: progress::total_activity(&exams),
        best_performance: progress::best_performance(&scores).cloned(),
        trend: analytics::determine_trend(&scores),
        chart: analytics::chart_series(&scores),
        heatmap: practice.iter().map(|d| d.to_record()).collect(),
    }
}

fn unknown_classroom(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": format!("unknown classroom '{id}'")
    }))
}

// Progress dashboard endpoint
async fn classroom_progress(
    path: web::Path<String>,
    query: web::Query<YearQuery>,
    store: web::Data<SnapshotStore>,
) -> HttpResponse {
    let classroom = path.into_inner();
    if !store.has_classroom(&classroom) {
        return unknown_classroom(&classroom);
    }

    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let dashboard = build_dashboard(&store, &classroom, year, today);

    HttpResponse::Ok().json(dashboard)
}

// Activity snapshot ingest: replaces the (classroom, year, kind)
// snapshot wholesale, mirroring the front end's refetch lifecycle.
async fn replace_activity(
    path: web::Path<(String, String)>,
    query: web::Query<YearQuery>,
    records: web::Json<Vec<DailyActivityRecord>>,
    store: web::Data<SnapshotStore>,
) -> HttpResponse {
    let (classroom, kind) = path.into_inner();
    let kind = match ActivityKind::from_str(&kind) {
        Some(kind) => kind,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("unknown activity kind '{kind}', expected 'practice' or 'exam'")
            }))
        }
    };
    if !store.has_classroom(&classroom) {
        return unknown_classroom(&classroom);
    }

    let year = query
        .year
        .unwrap_or_else(|| Local::now().date_naive().year());
    let (days, dropped) = sanitize_activity(&records);
    let accepted = days.len();
    info!(%classroom, year, kind = kind.as_str(), accepted, dropped, "activity snapshot replaced");
    store.replace_activity(&classroom, year, kind, days);

    HttpResponse::Ok().json(IngestReport { accepted, dropped })
}

// Performance snapshot ingest
async fn replace_performance(
    path: web::Path<String>,
    query: web::Query<YearQuery>,
    records: web::Json<Vec<PerformanceRecord>>,
    store: web::Data<SnapshotStore>,
) -> HttpResponse {
    let classroom = path.into_inner();
    if !store.has_classroom(&classroom) {
        return unknown_classroom(&classroom);
    }

    let year = query
        .year
        .unwrap_or_else(|| Local::now().date_naive().year());
    let (kept, dropped) = sanitize_performance(&records);
    let accepted = kept.len();
    info!(%classroom, year, accepted, dropped, "performance snapshot replaced");
    store.replace_performance(&classroom, year, kept);

    HttpResponse::Ok().json(IngestReport { accepted, dropped })
}

async fn list_classrooms(store: web::Data<SnapshotStore>) -> HttpResponse {
    HttpResponse::Ok().json(store.classrooms())
}

async fn chat_message(request: web::Json<ChatRequest>) -> HttpResponse {
    HttpResponse::Ok().json(ChatReply {
        reply: chat::reply_for(&request.message),
    })
}

// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Study Buddy API is running!")
}

// Success tips endpoint
async fn get_tips() -> HttpResponse {
    let tips = vec![
        "Short daily practice beats weekend cramming - keep the streak alive",
        "Review a lesson within 24 hours of studying it",
        "Mix practice sets across subjects instead of repeating one",
        "Aim for at least one session every day, even five minutes counts",
        "Check your performance chart weekly and focus on the dips",
        "Sleep 7-8 hours; memory consolidation does the rest",
    ];

    HttpResponse::Ok().json(tips)
}

// Homepage endpoint
async fn serve_homepage() -> HttpResponse {
    let html_content = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Study Buddy - Progress Dashboard</title>
        <style>
            body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
            .container { background: #f5f5f5; padding: 25px; border-radius: 10px; }
            .form-group { margin: 15px 0; }
            label { display: block; margin-bottom: 5px; font-weight: bold; }
            input, select { width: 100%; padding: 10px; border: 1px solid #ddd; border-radius: 4px; }
            button { background: #007bff; color: white; padding: 12px 24px; border: none; border-radius: 4px; cursor: pointer; margin: 5px; }
            button:hover { background: #0056b3; }
            .cards { display: grid; grid-template-columns: 1fr 1fr; gap: 15px; margin: 20px 0; }
            .card { background: white; padding: 15px; border-radius: 8px; border-left: 4px solid #007bff; }
            .card p { font-size: 24px; margin: 0; color: #007bff; }
            .result { margin-top: 20px; padding: 20px; border-radius: 5px; background: #d1ecf1; color: #0c5460; display: none; }
        </style>
    </head>
    <body>
        <div class="container">
            <h1>Study Buddy</h1>
            <p>Pick a classroom and year to see your study streak and performance:</p>

            <div class="form-group">
                <label for="classroom">Classroom:</label>
                <select id="classroom"></select>
            </div>

            <div class="form-group">
                <label for="year">Year:</label>
                <input type="number" id="year" value="2025">
            </div>

            <button onclick="loadDashboard()">Load Dashboard</button>
            <button onclick="showTips()" style="background: #6f42c1;">Study Tips</button>

            <div class="cards" id="cards" style="display: none;">
                <div class="card"><h4>Current Streak</h4><p id="streak"></p></div>
                <div class="card"><h4>Longest Streak</h4><p id="longest"></p></div>
                <div class="card"><h4>Practice Sessions</h4><p id="practice"></p></div>
                <div class="card"><h4>Best Score</h4><p id="best"></p></div>
            </div>

            <div id="dashboard" class="result"></div>
            <div id="tips" class="result"></div>

            <div class="form-group">
                <label for="chat-input">Ask your study buddy:</label>
                <input type="text" id="chat-input" placeholder="How does my streak work?">
            </div>
            <button onclick="sendChat()" style="background: #28a745;">Send</button>
            <div id="chat-reply" class="result"></div>
        </div>

        <script>
            async function loadClassrooms() {
                const response = await fetch('/api/classrooms');
                const classrooms = await response.json();
                const select = document.getElementById('classroom');
                select.innerHTML = classrooms.map(c =>
                    `<option value="${c.id}">${c.name} (${c.subject})</option>`
                ).join('');
            }

            async function loadDashboard() {
                const classroom = document.getElementById('classroom').value;
                const year = document.getElementById('year').value;
                const resultDiv = document.getElementById('dashboard');

                try {
                    const response = await fetch(`/api/classrooms/${classroom}/progress?year=${year}`);
                    const data = await response.json();
                    if (!response.ok) throw new Error(data.error);

                    document.getElementById('cards').style.display = 'grid';
                    document.getElementById('streak').textContent = data.current_streak + ' days';
                    document.getElementById('longest').textContent = data.longest_streak + ' days';
                    document.getElementById('practice').textContent = data.practice_total;
                    document.getElementById('best').textContent = data.best_performance
                        ? `${data.best_performance.score}% (${data.best_performance.label})`
                        : 'no scores yet';

                    resultDiv.style.display = 'block';
                    resultDiv.innerHTML = `
                        <p><strong>Active days:</strong> ${data.active_days}</p>
                        <p><strong>Exams taken:</strong> ${data.exam_total}</p>
                        <p><strong>Trend:</strong> ${data.trend}</p>
                    `;
                } catch (error) {
                    resultDiv.style.display = 'block';
                    resultDiv.innerHTML = `<p>Error: ${error.message}</p>`;
                }
            }

            async function showTips() {
                const response = await fetch('/api/tips');
                const tips = await response.json();
                const tipsDiv = document.getElementById('tips');
                tipsDiv.style.display = 'block';
                tipsDiv.innerHTML = '<ul>' + tips.map(tip => `<li>${tip}</li>`).join('') + '</ul>';
            }

            async function sendChat() {
                const message = document.getElementById('chat-input').value;
                const response = await fetch('/api/chat', {
                    method: 'POST',
                    headers: {'Content-Type': 'application/json'},
                    body: JSON.stringify({message})
                });
                const data = await response.json();
                const replyDiv = document.getElementById('chat-reply');
                replyDiv.style.display = 'block';
                replyDiv.textContent = data.reply;
            }

            loadClassrooms();
        </script>
    </body>
    </html>
    "#;

    HttpResponse::Ok().content_type("text/html").body(html_content)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_homepage))
        .route("/health", web::get().to(health_check))
        .route("/api/classrooms", web::get().to(list_classrooms))
        .route(
            "/api/classrooms/{id}/progress",
            web::get().to(classroom_progress),
        )
        .route(
            "/api/classrooms/{id}/activity/{kind}",
            web::put().to(replace_activity),
        )
        .route(
            "/api/classrooms/{id}/performance",
            web::put().to(replace_performance),
        )
        .route("/api/chat", web::post().to(chat_message))
        .route("/api/tips", web::get().to(get_tips));
}
