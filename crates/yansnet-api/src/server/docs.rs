//! Interactive documentation: OpenAPI document plus Swagger UI and ReDoc pages

use crate::config::Settings;
use crate::state::AppState;
use axum::{extract::State, response::Html, Json};
use serde_json::{json, Map, Value};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
    })
}

fn name_parameter() -> Value {
    json!([{ "name": "name", "in": "path", "required": true, "schema": { "type": "string" } }])
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{}", schema) } } }
    })
}

fn paths() -> Map<String, Value> {
    let mut paths = Map::new();

    paths.insert(
        "/".to_string(),
        json!({ "get": {
            "summary": "Service information",
            "responses": { "200": { "description": "Service metadata" } }
        }}),
    );
    paths.insert(
        "/health".to_string(),
        json!({ "get": {
            "summary": "Health check of the API and every registered model",
            "responses": { "200": { "description": "Aggregate health" } }
        }}),
    );
    paths.insert(
        "/api/v1/models".to_string(),
        json!({ "get": {
            "summary": "List registered models",
            "responses": { "200": { "description": "Registered models keyed by name" } }
        }}),
    );
    paths.insert(
        "/api/v1/models/{name}".to_string(),
        json!({ "get": {
            "summary": "Describe one model",
            "parameters": name_parameter(),
            "responses": {
                "200": { "description": "Model summary" },
                "404": error_response("Unknown model")
            }
        }}),
    );
    paths.insert(
        "/api/v1/models/{name}/health".to_string(),
        json!({ "get": {
            "summary": "Health check of one model",
            "parameters": name_parameter(),
            "responses": {
                "200": { "description": "Model health" },
                "404": error_response("Unknown model")
            }
        }}),
    );
    paths.insert(
        "/api/v1/predict".to_string(),
        json!({ "post": {
            "summary": "Detect depression signals in one text",
            "requestBody": json_body("PredictRequest"),
            "responses": {
                "200": { "description": "Prediction" },
                "404": error_response("Unknown model or no default model"),
                "422": error_response("Invalid input"),
                "502": error_response("Inference backend error")
            }
        }}),
    );
    paths.insert(
        "/api/v1/predict/batch".to_string(),
        json!({ "post": {
            "summary": "Detect depression signals in several texts",
            "requestBody": json_body("BatchPredictRequest"),
            "responses": {
                "200": { "description": "Predictions in request order" },
                "404": error_response("Unknown model or no default model"),
                "422": error_response("Invalid input"),
                "502": error_response("Inference backend error")
            }
        }}),
    );

    paths
}

fn schemas() -> Map<String, Value> {
    let mut schemas = Map::new();

    schemas.insert(
        "PredictRequest".to_string(),
        json!({
            "type": "object",
            "required": ["text"],
            "properties": {
                "text": { "type": "string" },
                "model": { "type": "string", "nullable": true }
            }
        }),
    );
    schemas.insert(
        "BatchPredictRequest".to_string(),
        json!({
            "type": "object",
            "required": ["texts"],
            "properties": {
                "texts": { "type": "array", "items": { "type": "string" } },
                "model": { "type": "string", "nullable": true }
            }
        }),
    );
    schemas.insert(
        "Prediction".to_string(),
        json!({
            "type": "object",
            "properties": {
                "prediction": { "type": "integer", "enum": [0, 1] },
                "label": { "type": "string", "enum": ["normal", "depression"] },
                "confidence": { "type": "number", "minimum": 0, "maximum": 1 },
                "reasoning": { "type": "string" },
                "model": { "type": "string" },
                "latency_ms": { "type": "integer" }
            }
        }),
    );
    schemas.insert(
        "Error".to_string(),
        json!({
            "type": "object",
            "properties": {
                "error": { "type": "string" },
                "detail": { "type": "string" },
                "timestamp": { "type": "string", "format": "date-time" }
            }
        }),
    );

    schemas
}

/// OpenAPI 3 description of the HTTP surface
pub fn openapi_document(settings: &Settings) -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": settings.api_title,
            "version": settings.api_version,
            "description": settings.api_description,
        },
        "paths": paths(),
        "components": { "schemas": schemas() }
    })
}

pub async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.settings))
}

pub async fn swagger_ui(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <title>{title} - Swagger UI</title>
  <meta charset="utf-8"/>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    SwaggerUIBundle({{ url: "/openapi.json", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>"##,
        title = state.settings.api_title
    ))
}

pub async fn redoc(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <title>{title} - ReDoc</title>
  <meta charset="utf-8"/>
</head>
<body>
  <redoc spec-url="/openapi.json"></redoc>
  <script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>"##,
        title = state.settings.api_title
    ))
}
