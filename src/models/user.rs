use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A row of the `"Users"` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub description: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when inserting a user. `id` and `createdAt` are assigned by storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUser {
    pub name: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Partial update. Each field: `None` ignore, `Some(None)` clear, `Some(Some(v))` set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<Option<String>>,
    pub dob: Option<Option<DateTime<Utc>>>,
    pub address: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl UserChanges {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(dob) = self.dob {
            user.dob = dob;
        }
        if let Some(address) = self.address {
            user.address = address;
        }
        if let Some(description) = self.description {
            user.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn apply_keeps_untouched_fields() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut user = User {
            id: 7,
            name: Some("asd".into()),
            dob: None,
            address: Some("jln".into()),
            description: Some("dsc".into()),
            created_at,
        };

        UserChanges {
            name: Some(Some("new name".into())),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.id, 7);
        assert_eq!(user.name.as_deref(), Some("new name"));
        assert_eq!(user.address.as_deref(), Some("jln"));
        assert_eq!(user.description.as_deref(), Some("dsc"));
        assert_eq!(user.created_at, created_at);
    }

    #[test]
    fn apply_clears_fields_set_to_none() {
        let mut user = User {
            id: 1,
            name: Some("asd".into()),
            dob: Some(Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap()),
            address: Some("jln".into()),
            description: Some("dsc".into()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        UserChanges {
            dob: Some(None),
            address: Some(None),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.dob, None);
        assert_eq!(user.address, None);
        assert_eq!(user.name.as_deref(), Some("asd"));
        assert_eq!(user.description.as_deref(), Some("dsc"));
    }
}
