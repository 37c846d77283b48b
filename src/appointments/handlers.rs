use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    appointments::{
        dates::parse_appointment_date,
        dto::{
            AppointmentView, AppointmentWithContact, CreateAppointmentRequest, DeleteResponse,
            UpdateAppointmentRequest,
        },
        repo::Appointment,
    },
    auth::{extractors::AuthUser, repo::User, token::mint_appointment_id},
    error::ApiError,
    state::AppState,
};

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user_appointment",
            get(list_appointments).post(create_appointment),
        )
        .route(
            "/user_appointment/:id",
            put(update_appointment).delete(delete_appointment),
        )
}

fn bad_date(e: anyhow::Error) -> ApiError {
    ApiError::BadRequest(format!("Incorrect datetime format: {e}"))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_appointments(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<AppointmentWithContact>>, ApiError> {
    let AuthUser(user) = user;
    let appointments = Appointment::list_by_user(&state.db, user.id).await?;

    let mut response = Vec::with_capacity(appointments.len());
    for appointment in &appointments {
        // The owner is always the caller; the join is on the stable id.
        response.push(AppointmentWithContact::from_parts(appointment, &user)?);
    }
    Ok(Json(response))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn create_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentView>), ApiError> {
    let AuthUser(user) = user;
    let appointment_date = parse_appointment_date(&payload.appointment_date).map_err(bad_date)?;

    // Profile overwrite and appointment insert commit together.
    let mut tx = state.db.begin().await?;
    User::update_contact(
        &mut tx,
        user.id,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.phone_number,
    )
    .await?;
    let appointment = Appointment::insert(
        &mut tx,
        &mint_appointment_id(),
        &payload.vehicle_type,
        &payload.additional_notes,
        appointment_date,
        user.id,
    )
    .await?;
    tx.commit().await?;

    info!(appointment_id = %appointment.id, "appointment created");
    Ok((
        StatusCode::CREATED,
        Json(AppointmentView::from_record(&appointment)?),
    ))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn update_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentView>, ApiError> {
    let AuthUser(user) = user;

    // Lookup and writes share one transaction, so a row deleted between
    // them still resolves to 404 rather than a failed UPDATE.
    let mut tx = state.db.begin().await?;
    let appointment = Appointment::find_owned(&mut *tx, &id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".into()))?;

    let resolved = payload.resolve_against(&user, &appointment)?;
    let appointment_date = parse_appointment_date(&resolved.appointment_date).map_err(bad_date)?;

    User::update_contact(
        &mut tx,
        user.id,
        &resolved.first_name,
        &resolved.last_name,
        &resolved.email,
        &resolved.phone_number,
    )
    .await?;
    let appointment = Appointment::update(
        &mut tx,
        &id,
        user.id,
        &resolved.vehicle_type,
        &resolved.additional_notes,
        appointment_date,
    )
    .await?;
    tx.commit().await?;

    info!(appointment_id = %appointment.id, "appointment updated");
    Ok(Json(AppointmentView::from_record(&appointment)?))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn delete_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let AuthUser(user) = user;
    let deleted = Appointment::delete_owned(&state.db, &id, user.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Appointment not found".into()));
    }

    info!(appointment_id = %id, "appointment deleted");
    Ok(Json(DeleteResponse {
        message: "Appointment deleted successfully".into(),
    }))
}
