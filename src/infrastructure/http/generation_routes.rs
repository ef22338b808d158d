//! Generation run API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    GenerationRunDto, GenerationRunSummaryDto, StartGenerationResponseDto,
};
use crate::domain::value_objects::{GenerationRunId, PresentationFormData};
use crate::infrastructure::state::AppState;

/// Validate the form and start a run in the background
pub async fn start_generation(
    State(state): State<Arc<AppState>>,
    Json(form): Json<PresentationFormData>,
) -> Result<(StatusCode, Json<StartGenerationResponseDto>), (StatusCode, String)> {
    form.validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let run_id = state.runs.spawn_run(state.pipeline.clone(), form);

    Ok((
        StatusCode::ACCEPTED,
        Json(StartGenerationResponseDto {
            run_id: run_id.to_string(),
        }),
    ))
}

/// List all runs, newest first
pub async fn list_generations(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<GenerationRunSummaryDto>> {
    Json(state.runs.list())
}

/// Get one run with its full progress history
pub async fn get_generation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GenerationRunDto>, (StatusCode, String)> {
    let run_id = parse_run_id(&id)?;

    state
        .runs
        .get(run_id)
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Generation run not found".to_string()))
}

pub(crate) fn parse_run_id(id: &str) -> Result<GenerationRunId, (StatusCode, String)> {
    GenerationRunId::parse(id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid generation run ID".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::RunStateDto;
    use crate::domain::value_objects::{sample_form, PipelineSettings};
    use crate::infrastructure::config::AppConfig;

    fn test_state() -> Arc<AppState> {
        let config = AppConfig {
            llm_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_api_key: "test".to_string(),
            llm_model: "gpt-4o".to_string(),
            tavily_base_url: "http://127.0.0.1:9".to_string(),
            tavily_api_key: "test".to_string(),
            gamma_base_url: "http://127.0.0.1:9".to_string(),
            gamma_api_key: "test".to_string(),
            server_port: 0,
            max_finished_runs: 10,
        };
        Arc::new(AppState::new(&config, &PipelineSettings::default()))
    }

    #[tokio::test]
    async fn test_start_rejects_incomplete_form() {
        let state = test_state();
        let mut form = sample_form();
        form.investment_thesis = "  ".to_string();

        let (status, message) = start_generation(State(state.clone()), Json(form))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("investmentThesis"));
        assert!(state.runs.list().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_run_is_not_found() {
        let state = test_state();
        let (status, _) = get_generation(State(state), Path(GenerationRunId::new().to_string()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_malformed_id_is_bad_request() {
        let state = test_state();
        let (status, _) = get_generation(State(state), Path("not-a-uuid".to_string()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_registered_run_is_listed_and_readable() {
        let state = test_state();
        let run_id = state.runs.start("Acme");

        let Json(runs) = list_generations(State(state.clone())).await;
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].run_id, run_id.to_string());

        let Json(run) = get_generation(State(state), Path(run_id.to_string()))
            .await
            .unwrap();
        assert_eq!(run.company_name, "Acme");
        assert_eq!(run.state, RunStateDto::Running);
    }
}
