use serde::{Deserialize, Serialize};

use crate::appointments::dates::format_appointment_date;
use crate::appointments::repo::Appointment;
use crate::auth::repo::User;

/// Body of `POST /user_appointment`. The contact fields are required and
/// overwrite the caller's stored profile wholesale.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub vehicle_type: String,
    pub appointment_date: String,
    #[serde(default)]
    pub additional_notes: String,
}

/// Body of `PUT /user_appointment/:id`; every field optional, absent ones
/// keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub appointment_date: Option<String>,
    pub additional_notes: Option<String>,
}

/// The patch resolved against the caller's profile and the stored
/// appointment; the date is still a raw string and validated afterwards.
#[derive(Debug)]
pub struct ResolvedUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub vehicle_type: String,
    pub appointment_date: String,
    pub additional_notes: String,
}

impl UpdateAppointmentRequest {
    pub fn resolve_against(
        self,
        user: &User,
        appointment: &Appointment,
    ) -> anyhow::Result<ResolvedUpdate> {
        let appointment_date = match self.appointment_date {
            Some(raw) => raw,
            None => format_appointment_date(&appointment.appointment_date)?,
        };
        Ok(ResolvedUpdate {
            first_name: self.first_name.unwrap_or_else(|| user.first_name.clone()),
            last_name: self.last_name.unwrap_or_else(|| user.last_name.clone()),
            email: self.email.unwrap_or_else(|| user.email.clone()),
            phone_number: self
                .phone_number
                .unwrap_or_else(|| user.phone_number.clone()),
            vehicle_type: self
                .vehicle_type
                .unwrap_or_else(|| appointment.vehicle_type.clone()),
            appointment_date,
            additional_notes: self
                .additional_notes
                .unwrap_or_else(|| appointment.additional_notes.clone()),
        })
    }
}

/// Public schema view returned from create and update; ownership and
/// credential fields are deliberately absent.
#[derive(Debug, Serialize)]
pub struct AppointmentView {
    pub id: String,
    pub vehicle_type: String,
    pub additional_notes: String,
    pub appointment_date: String,
}

impl AppointmentView {
    pub fn from_record(appointment: &Appointment) -> anyhow::Result<Self> {
        Ok(Self {
            id: appointment.id.clone(),
            vehicle_type: appointment.vehicle_type.clone(),
            additional_notes: appointment.additional_notes.clone(),
            appointment_date: format_appointment_date(&appointment.appointment_date)?,
        })
    }
}

/// One row of `GET /user_appointment`: appointment fields flattened
/// together with the owner's contact fields.
#[derive(Debug, Serialize)]
pub struct AppointmentWithContact {
    pub id: String,
    pub vehicle_type: String,
    pub appointment_date: String,
    pub additional_notes: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl AppointmentWithContact {
    pub fn from_parts(appointment: &Appointment, owner: &User) -> anyhow::Result<Self> {
        Ok(Self {
            id: appointment.id.clone(),
            vehicle_type: appointment.vehicle_type.clone(),
            appointment_date: format_appointment_date(&appointment.appointment_date)?,
            additional_notes: appointment.additional_notes.clone(),
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            email: owner.email.clone(),
            phone_number: owner.phone_number.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            phone_number: "555-0101".into(),
            email: "grace@example.com".into(),
            password_hash: "hash".into(),
            g_auth_verify: false,
            token: "aa".repeat(24),
            date_created: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn sample_appointment(user: &User) -> Appointment {
        Appointment {
            id: "abc123".into(),
            vehicle_type: "sedan".into(),
            additional_notes: "winter tires".into(),
            appointment_date: datetime!(2024-03-01 10:00),
            user_id: user.id,
        }
    }

    #[test]
    fn empty_patch_resolves_to_current_values() {
        let user = sample_user();
        let appt = sample_appointment(&user);
        let resolved = UpdateAppointmentRequest::default()
            .resolve_against(&user, &appt)
            .unwrap();
        assert_eq!(resolved.first_name, "Grace");
        assert_eq!(resolved.last_name, "Hopper");
        assert_eq!(resolved.email, "grace@example.com");
        assert_eq!(resolved.phone_number, "555-0101");
        assert_eq!(resolved.vehicle_type, "sedan");
        assert_eq!(resolved.additional_notes, "winter tires");
        assert_eq!(resolved.appointment_date, "2024-03-01 10:00");
    }

    #[test]
    fn notes_only_patch_leaves_other_fields_alone() {
        let user = sample_user();
        let appt = sample_appointment(&user);
        let resolved = UpdateAppointmentRequest {
            additional_notes: Some("also rotate tires".into()),
            ..Default::default()
        }
        .resolve_against(&user, &appt)
        .unwrap();
        assert_eq!(resolved.additional_notes, "also rotate tires");
        assert_eq!(resolved.vehicle_type, appt.vehicle_type);
        assert_eq!(resolved.appointment_date, "2024-03-01 10:00");
        assert_eq!(resolved.first_name, user.first_name);
    }

    #[test]
    fn view_hides_ownership_fields() {
        let user = sample_user();
        let appt = sample_appointment(&user);
        let json =
            serde_json::to_string(&AppointmentView::from_record(&appt).unwrap()).unwrap();
        assert!(json.contains("\"appointment_date\":\"2024-03-01 10:00\""));
        assert!(!json.contains("user_id"));
        assert!(!json.contains("token"));
    }

    #[test]
    fn create_request_defaults_notes_to_empty() {
        let req: CreateAppointmentRequest = serde_json::from_str(
            r#"{
                "first_name": "G", "last_name": "H", "email": "g@h.io",
                "phone_number": "1", "vehicle_type": "van",
                "appointment_date": "2024-03-01 10:00"
            }"#,
        )
        .unwrap();
        assert_eq!(req.additional_notes, "");
    }
}
