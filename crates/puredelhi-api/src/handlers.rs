use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use puredelhi_ai::{fallback_advice, AdviceRequest};
use puredelhi_core::{
    AuthContext, DashboardError, PollutionLevel, Report, SecurityEvent, SecurityLogger, User,
    UserProfile, WardData,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Deserialize)]
pub struct SeedRequest {
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub wards: usize,
}

#[derive(Deserialize)]
pub struct CreateReportRequest {
    pub category: String,
    pub description: String,
    pub location: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceBody {
    pub aqi: u16,
    pub ward_name: String,
    pub pollution_level: PollutionLevel,
}

#[derive(Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }
    if request.password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = state.passwords.hash_password(&request.password)?;
    let user = User {
        id: Uuid::new_v4(),
        email: request.email.trim().to_lowercase(),
        name: request.name,
        password_hash,
        role: "citizen".to_string(),
        created_at: Utc::now(),
    };

    let user = state.store.insert_user(user).map_err(|e| {
        if matches!(e, DashboardError::UserExists(_)) {
            SecurityLogger::log_event(SecurityEvent::SignupRejected {
                email: request.email.clone(),
                reason: "email already registered".to_string(),
            });
        }
        ApiError::from(e)
    })?;

    SecurityLogger::log_event(SecurityEvent::SignupSuccess {
        user_id: user.id,
        email: user.email.clone(),
    });

    Ok(Json(SignupResponse {
        message: "User created".to_string(),
        user_id: user.id,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = request.email.trim().to_lowercase();
    let user = state.store.find_user_by_email(&email);

    // Verify against a user if found; a miss and a bad password take the
    // same path so the response does not reveal which one happened.
    let authenticated = match &user {
        Some(user) => state
            .passwords
            .verify_password(&request.password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| authenticated) else {
        SecurityLogger::log_event(SecurityEvent::LoginFailure { email });
        return Err(ApiError::from(DashboardError::InvalidCredentials));
    };

    let token = state.jwt.issue_token(&user)?;
    SecurityLogger::log_event(SecurityEvent::LoginSuccess {
        user_id: user.id,
        email: user.email.clone(),
    });

    Ok(Json(LoginResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

pub async fn list_wards(State(state): State<AppState>) -> Json<Vec<WardData>> {
    Json(state.store.all_wards().await)
}

pub async fn get_ward(
    State(state): State<AppState>,
    Path(ward_id): Path<String>,
) -> ApiResult<Json<WardData>> {
    let id = Uuid::parse_str(&ward_id)
        .map_err(|_| ApiError::BadRequest("Invalid ward ID format".to_string()))?;

    let ward = state
        .store
        .ward_by_id(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Ward {} not found", ward_id)))?;

    Ok(Json(ward))
}

pub async fn seed_wards(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> ApiResult<Json<SeedResponse>> {
    // The body is optional; an empty POST reseeds with the configured seed.
    let requested = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<SeedRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid seed body: {e}")))?
            .seed
    };
    let seed = requested.unwrap_or(state.config.wards.seed);

    let wards = state.store.reseed_wards(seed).await;
    Ok(Json(SeedResponse {
        message: "Seeded successfully".to_string(),
        wards,
    }))
}

pub async fn create_report(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateReportRequest>,
) -> ApiResult<(StatusCode, Json<Report>)> {
    if request.description.trim().is_empty() {
        return Err(ApiError::Validation("Description is required".to_string()));
    }

    let report = state.store.insert_report(Report {
        id: Uuid::new_v4(),
        user_id: context.user_id,
        category: request.category,
        description: request.description,
        location: request.location,
        created_at: Utc::now(),
    });

    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn my_reports(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Json<Vec<Report>> {
    Json(state.store.reports_for_user(context.user_id))
}

pub async fn health_advice(
    State(state): State<AppState>,
    Json(body): Json<AdviceBody>,
) -> ApiResult<Json<AdviceResponse>> {
    let Some(provider) = &state.advice else {
        return Err(ApiError::Internal("AI API Key missing".to_string()));
    };

    let request = AdviceRequest {
        ward_name: body.ward_name,
        aqi: body.aqi,
        pollution_level: body.pollution_level,
    };

    // Upstream failure degrades to canned advice so the UI stays smooth.
    let advice = match provider.advise(&request).await {
        Ok(advice) => advice,
        Err(e) => {
            warn!(error = %e, ward = %request.ward_name, "Advice provider failed, using fallback");
            fallback_advice(&request)
        }
    };

    Ok(Json(AdviceResponse {
        advice: advice.advice,
    }))
}
