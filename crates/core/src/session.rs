//! Explicit API session passed to whatever builds backend requests,
//! instead of reading a token out of global storage at each call site.
//!
//! Hosts that talk to the backend (a browser shell, a sync job) hold the
//! session and ask for [`ApiRequest`]s; the grid itself never does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

use crate::fetch::DayQuery;

const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session expired at {0}")]
    Expired(DateTime<Utc>),
    #[error("session has no token")]
    MissingToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl ApiSession {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// `Authorization` header value, or why the session cannot be used.
    pub fn authorize(&self, now: DateTime<Utc>) -> Result<String, SessionError> {
        if self.token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        if self.is_expired(now) {
            return Err(SessionError::Expired(self.expires_at));
        }
        Ok(format!("Bearer {}", self.token))
    }
}

/// A fully described backend request. Sending it is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub authorization: String,
}

impl ApiRequest {
    /// The appointments feed for one day, optionally narrowed to one staff member.
    pub fn day_schedule(
        session: &ApiSession,
        query: &DayQuery,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let authorization = session.authorize(now)?;
        let mut params = form_urlencoded::Serializer::new(String::new());
        params.append_pair("date", &query.date.format("%Y-%m-%d").to_string());
        if let Some(staff_id) = &query.staff_id {
            params.append_pair("staffId", staff_id);
        }
        Ok(Self {
            method: "GET".into(),
            path: format!("{API_PREFIX}/appointments?{}", params.finish()),
            authorization,
        })
    }

    /// Staff roster used to build the grid's lanes.
    pub fn staff(session: &ApiSession, now: DateTime<Utc>) -> Result<Self, SessionError> {
        Ok(Self {
            method: "GET".into(),
            path: format!("{API_PREFIX}/staff"),
            authorization: session.authorize(now)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn query() -> DayQuery {
        DayQuery::new(chrono::NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"))
    }

    #[test]
    fn expiry_is_inclusive() {
        let session = ApiSession::new("tok", at(12));
        assert!(!session.is_expired(at(11)));
        assert!(session.is_expired(at(12)));
        assert!(session.is_expired(at(12) + Duration::seconds(1)));
    }

    #[test]
    fn expired_session_cannot_authorize() {
        let session = ApiSession::new("tok", at(12));
        assert_eq!(session.authorize(at(9)), Ok("Bearer tok".to_string()));
        assert_eq!(session.authorize(at(13)), Err(SessionError::Expired(at(12))));
        assert_eq!(
            ApiSession::new("", at(12)).authorize(at(9)),
            Err(SessionError::MissingToken)
        );
    }

    #[test]
    fn day_schedule_request() {
        let session = ApiSession::new("tok", at(12));
        let query = DayQuery {
            staff_id: Some("s 1&x".into()),
            ..query()
        };
        let req = ApiRequest::day_schedule(&session, &query, at(9)).expect("fresh");
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/api/v1/appointments?date=2026-10-16&staffId=s+1%26x");
        assert_eq!(req.authorization, "Bearer tok");

        assert!(ApiRequest::day_schedule(&session, &self::query(), at(14)).is_err());
        assert_eq!(
            ApiRequest::staff(&session, at(9)).map(|r| r.path),
            Ok("/api/v1/staff".to_string())
        );
    }
}
