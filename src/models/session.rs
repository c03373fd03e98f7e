use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    Tariffs,
    Tracking,
    Cabinet,
    About,
    Contacts,
    Admin,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.created_at) >= ttl
    }

    pub fn landing_section(&self) -> Section {
        match self.role {
            Role::Admin => Section::Admin,
            Role::User => Section::Cabinet,
        }
    }
}

pub fn visible_sections(session: Option<&Session>) -> Vec<Section> {
    let mut sections = vec![Section::Home, Section::Tariffs, Section::Tracking];

    if session.is_some() {
        sections.push(Section::Cabinet);
    }

    sections.extend([Section::About, Section::Contacts]);

    if session.is_some_and(Session::is_admin) {
        sections.push(Section::Admin);
    }

    sections
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use uuid::Uuid;

    use super::{visible_sections, Role, Section, Session};

    fn session(role: Role) -> Session {
        Session {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            user_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn anonymous_visitor_sees_public_sections_only() {
        let sections = visible_sections(None);
        assert!(!sections.contains(&Section::Cabinet));
        assert!(!sections.contains(&Section::Admin));
    }

    #[test]
    fn admin_sees_cabinet_and_console() {
        let admin = session(Role::Admin);
        let sections = visible_sections(Some(&admin));

        assert!(sections.contains(&Section::Cabinet));
        assert_eq!(sections.last(), Some(&Section::Admin));
        assert_eq!(admin.landing_section(), Section::Admin);
    }

    #[test]
    fn user_lands_on_cabinet() {
        let user = session(Role::User);
        assert_eq!(user.landing_section(), Section::Cabinet);
        assert!(!visible_sections(Some(&user)).contains(&Section::Admin));
    }

    #[test]
    fn session_expires_once_ttl_has_elapsed() {
        let user = session(Role::User);
        let ttl = TimeDelta::hours(24);

        assert!(!user.is_expired(user.created_at + TimeDelta::hours(23), ttl));
        assert!(user.is_expired(user.created_at + TimeDelta::hours(24), ttl));
    }
}
