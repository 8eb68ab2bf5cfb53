use axum::http::StatusCode;
use axum::body::Body;
use http_body_util::BodyExt;
use tower::ServiceExt;
use serde_json::{json, Value};
use fixstats::db::{Database, NewResult};
use fixstats::api::{build_router, AppState};
use fixstats::stats::StabilityOptions;

fn create_test_state() -> AppState {
    let db = Database::in_memory().unwrap();
    AppState {
        db,
        stability: StabilityOptions::default(),
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn multipart_request(uri: &str, file_name: &str, content: &str, prompt: Option<&str>) -> axum::http::Request<Body> {
    let boundary = "fixstats-test-boundary";
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: application/json\r\n\r\n{c}\r\n",
        b = boundary, f = file_name, c = content,
    );
    if let Some(p) = prompt {
        body.push_str(&format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{p}\r\n",
            b = boundary, p = p,
        ));
    }
    body.push_str(&format!("--{}--\r\n", boundary));

    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

fn report(fixes: i64, minutes: f64, false_positives: Option<i64>, errors: Value) -> Value {
    let mut report = json!({
        "project_name": "Victoria Test Application",
        "project_github_url": "https://github.com/camelliabi/autohive",
        "number_of_fixes": fixes,
        "total_time_spent_minutes": minutes,
        "number_of_errors_from_raygun": 17,
        "run_time": minutes,
        "errors": errors,
    });
    if let Some(fp) = false_positives {
        report["false_positives"] = json!(fp);
    }
    report
}

async fn save(state: &AppState, body: Value, prompt: &str) -> Value {
    let req = make_request("POST", "/api/reports", Some(json!({ "json_data": body, "prompt": prompt })));
    let response = app(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state();
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fixstats");
}

#[tokio::test]
async fn test_save_report_and_list_projects() {
    let state = create_test_state();

    let body = save(&state, report(19, 65.0, Some(1), json!([
        { "error_id": "269815739353", "error_type": "FileNotFoundException", "was_fixed": false },
        { "error_id": "269876052491", "error_type": "InputMismatchException", "was_fixed": true }
    ])), "Fix the crashes").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["number_of_fixes"], 19);
    assert_eq!(body["total_errors_in_report"], 2);
    assert_eq!(body["total_errors_inserted"], 2);

    let req = make_request("GET", "/api/projects", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let projects = response_json(response).await;
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["project_id"], body["project_id"]);
    assert_eq!(projects[0]["number_of_errors"], 17);
}

#[tokio::test]
async fn test_save_report_invalid() {
    let state = create_test_state();
    let req = make_request("POST", "/api/reports", Some(json!({
        "json_data": { "project_name": "missing everything else" }
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["type"], "InvalidReportError");
    assert!(body["error"].as_str().unwrap().contains("project_github_url"));
}

#[tokio::test]
async fn test_averages_end_to_end() {
    let state = create_test_state();
    let first = save(&state, report(2, 10.0, Some(2), json!([])), "prompt A").await;
    save(&state, report(4, 20.0, Some(8), json!([])), "prompt A").await;
    save(&state, report(7, 5.0, Some(0), json!([])), "prompt B").await;

    let uri = format!("/aggregate/averages?project_id={}", first["project_id"]);
    let response = app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["configid"], first["config_id"]);
    assert_eq!(rows[0]["fixes"], 3.0);
    assert_eq!(rows[0]["time"], 15.0);
    assert_eq!(rows[0]["errors"], 0.0);
    assert_eq!(rows[0]["high-quality"], 0.0);
    assert_eq!(rows[1]["fixes"], 7.0);
}

#[tokio::test]
async fn test_stability_end_to_end() {
    let state = create_test_state();
    let first = save(&state, report(2, 10.0, Some(2), json!([])), "prompt A").await;
    save(&state, report(4, 20.0, Some(8), json!([])), "prompt A").await;
    save(&state, report(7, 5.0, Some(3), json!([])), "prompt B").await;

    let uri = format!("/aggregate/stability?project_id={}&signal=false_positives", first["project_id"]);
    let response = app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["configid"], first["config_id"]);
    let std_dev = rows[0]["std_dev"].as_f64().unwrap();
    assert!((std_dev - 18f64.sqrt()).abs() < 1e-9);
    // single run under the default policy
    assert_eq!(rows[1]["std_dev"], 0.0);
}

#[tokio::test]
async fn test_stability_default_signal_without_false_positives() {
    let state = create_test_state();
    let first = save(&state, report(2, 65.0, None, json!([
        { "error_id": "a", "error_type": "LogicError", "was_fixed": true }
    ])), "prompt A").await;
    save(&state, report(4, 65.0, None, json!([])), "prompt A").await;

    // detected errors default to the number of listed errors: 1 and 0
    let uri = format!("/aggregate/stability?project_id={}", first["project_id"]);
    let response = app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body[0]["configid"], first["config_id"]);
    let std_dev = body[0]["std_dev"].as_f64().unwrap();
    assert!((std_dev - 0.5f64.sqrt()).abs() < 1e-9);
}

#[tokio::test]
async fn test_stability_missing_false_positives_is_unprocessable() {
    let state = create_test_state();
    let first = save(&state, report(2, 10.0, None, json!([])), "prompt A").await;
    save(&state, report(4, 20.0, None, json!([])), "prompt A").await;

    let uri = format!("/aggregate/stability?project_id={}&signal=false_positives", first["project_id"]);
    let response = app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(body["type"], "DataError");
    assert!(body["error"].as_str().unwrap().contains("false_positives"));
}

#[tokio::test]
async fn test_stability_unknown_signal() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(make_request("GET", "/aggregate/stability?project_id=1&signal=warnings", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stability_excludes_unexecuted_runs() {
    let state = create_test_state();
    let project = state.db.insert_project("demo", "https://github.com/acme/demo", 0).unwrap();
    let config = state.db.insert_configuration(project, "p", "").unwrap();
    for (fp, run_time) in [(2, 1.0), (8, 1.0), (100, 0.0)] {
        state.db.insert_result(&NewResult {
            false_positives: Some(fp),
            run_time,
            ..NewResult::new(project, Some(config), 1, 1.0)
        }).unwrap();
    }

    let uri = format!("/aggregate/stability?project_id={}&signal=false_positives", project);
    let response = app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap();
    let body = response_json(response).await;
    let std_dev = body[0]["std_dev"].as_f64().unwrap();
    assert!((std_dev - 18f64.sqrt()).abs() < 1e-9);
}

#[tokio::test]
async fn test_averages_missing_fixes_is_unprocessable() {
    let state = create_test_state();
    let project = state.db.insert_project("demo", "https://github.com/acme/demo", 0).unwrap();
    let config = state.db.insert_configuration(project, "p", "").unwrap();
    state.db.insert_result(&NewResult::new(project, Some(config), 1, 1.0)).unwrap();
    // legacy row without a configuration
    state.db.insert_result(&NewResult::new(project, None, 1, 1.0)).unwrap();

    let uri = format!("/aggregate/averages?project_id={}", project);
    let response = app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("configuration_id"));
}

#[tokio::test]
async fn test_aggregates_unknown_project_empty() {
    let state = create_test_state();
    for uri in ["/aggregate/averages?project_id=404", "/aggregate/stability?project_id=404"] {
        let response = app(&state).oneshot(make_request("GET", uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert!(body.as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_aggregates_require_project_id() {
    let state = create_test_state();
    let response = app(&state).oneshot(make_request("GET", "/aggregate/averages", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["type"], "BadRequestError");

    let response = app(&state)
        .oneshot(make_request("GET", "/aggregate/averages?project_id=abc", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["type"], "BadRequestError");
}

#[tokio::test]
async fn test_malformed_bodies_get_json_errors() {
    let state = create_test_state();

    let req = make_request("POST", "/api/reports", Some(json!({ "prompt": "x" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["type"], "BadRequestError");
    assert!(body["error"].as_str().unwrap().contains("json_data"));

    let req = make_request("POST", "/api/projects/1/system_prompts", Some(json!("oops")));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["type"], "BadRequestError");

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/reports")
        .body(Body::from("{}"))
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["type"], "BadRequestError");

    let response = app(&state)
        .oneshot(make_request("GET", "/api/projects/abc/configurations", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["type"], "BadRequestError");

    let req = make_request("POST", "/api/reports/upload", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["type"], "BadRequestError");
}

#[tokio::test]
async fn test_create_project() {
    let state = create_test_state();
    let body = json!({
        "project_name": "Victoria Test Application",
        "github_url": "https://github.com/camelliabi/autohive",
        "number_of_errors": 17,
    });

    let response = app(&state).oneshot(make_request("POST", "/api/projects", Some(body.clone()))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = response_json(response).await;
    assert!(first["project_id"].is_i64());

    let response = app(&state).oneshot(make_request("POST", "/api/projects", Some(body))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response_json(response).await["project_id"], first["project_id"]);

    let projects = state.db.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].number_of_errors, 17);

    // a report for the same repository lands in the same project
    let saved = save(&state, report(1, 5.0, None, json!([])), "p").await;
    assert_eq!(saved["project_id"], first["project_id"]);

    let req = make_request("POST", "/api/projects", Some(json!({ "project_name": "", "github_url": "https://github.com/acme/x" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_errors() {
    let state = create_test_state();
    let first = save(&state, report(1, 5.0, None, json!([
        { "error_id": "269815739353", "error_type": "FileNotFoundException", "was_fixed": false },
        { "error_id": "269876052491", "error_type": "InputMismatchException", "was_fixed": true }
    ])), "prompt A").await;
    let second = save(&state, report(1, 5.0, None, json!([
        { "error_id": "LOGIC_ERROR_001", "error_type": "LogicError", "was_fixed": true }
    ])), "prompt B").await;
    let project = first["project_id"].as_i64().unwrap();

    let uri = format!("/api/projects/{}/errors", project);
    let body = response_json(app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap()).await;
    let errors = body.as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["error_id"], "269815739353");
    assert_eq!(errors[0]["was_fixed"], false);
    assert_eq!(errors[0]["project_id"], project);
    assert_eq!(errors[1]["error_type"], "InputMismatchException");

    let uri = format!("/api/projects/{}/errors?configuration_id={}", project, second["config_id"]);
    let body = response_json(app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["error_id"], "LOGIC_ERROR_001");

    let response = app(&state).oneshot(make_request("GET", "/api/projects/99/errors", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_routes_not_found() {
    let state = create_test_state();
    for suffix in ["configurations", "config_results", "fixed_errors", "errors"] {
        let uri = format!("/api/projects/99/{}", suffix);
        let response = app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let req = make_request("POST", "/api/projects/99/system_prompts", Some(json!({ "prompt": "p" })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_configuration_routes() {
    let state = create_test_state();
    let saved = save(&state, report(3, 60.0, Some(1), json!([
        { "error_id": "a", "error_type": "LogicError", "was_fixed": true },
        { "error_id": "b", "error_type": "LogicError", "was_fixed": false }
    ])), "Fix the crashes").await;
    let project = saved["project_id"].as_i64().unwrap();

    let req = make_request("POST", &format!("/api/projects/{}/system_prompts", project), Some(json!({
        "prompt": "Only fix null checks"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let added = response_json(response).await;
    assert!(added["configid"].is_i64());
    assert!(added["resultid"].is_i64());

    let uri = format!("/api/projects/{}/configurations", project);
    let body = response_json(app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap()).await;
    let configs = body.as_array().unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0]["prompt"], "Only fix null checks");
    assert_eq!(configs[1]["id"], saved["config_id"]);

    let uri = format!("/api/projects/{}/config_results", project);
    let body = response_json(app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap()).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["fixes"], 3);
    assert_eq!(rows[0]["detected_errors"], 2);
    assert_eq!(rows[0]["avg_detected_errors"], 2.0);

    let uri = format!("/api/projects/{}/fixed_errors", project);
    let body = response_json(app(&state).oneshot(make_request("GET", &uri, None)).await.unwrap()).await;
    assert_eq!(body[0]["system_prompt"], "Fix the crashes");
    assert_eq!(body[0]["total_fixed_errors"], 1);
    assert_eq!(body[1]["total_fixed_errors"], 0);
}

#[tokio::test]
async fn test_upload_report_multipart() {
    let state = create_test_state();
    let content = report(5, 30.0, Some(2), json!([
        { "error_id": "x", "error_type": "NullPointerException", "was_fixed": true }
    ])).to_string();

    let req = multipart_request("/api/reports/upload", "run-1.json", &content, Some("Fix the crashes"));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["message"], "file received");
    assert_eq!(body["total_errors_in_report"], 1);
    assert_eq!(body["total_errors_inserted"], 1);

    let project = body["project_id"].as_i64().unwrap();
    let configs = state.db.list_configurations(project).unwrap();
    assert_eq!(configs[0].prompt, "Fix the crashes");
}

#[tokio::test]
async fn test_upload_report_rejects_non_json_file() {
    let state = create_test_state();
    let req = multipart_request("/api/reports/upload", "run-1.txt", "{}", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid report: Only .json files are allowed");
}

#[tokio::test]
async fn test_cors_allows_dashboard_origin() {
    let state = create_test_state();
    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/api/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );

    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/api/health")
        .header("origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
