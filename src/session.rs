use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::store::Vault;

/// Stand-in for an account system. One local session at a time, created on
/// login and destroyed on logout. Downstream code only reads the display
/// label, never the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub identity: String,
    pub display_label: String,
    pub anonymous: bool,
    pub deployed_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn named(callsign: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            identity: format!("warrior-{}", now.timestamp_millis()),
            display_label: callsign.into(),
            anonymous: false,
            deployed_at: now,
            last_seen: now,
        }
    }

    pub fn anonymous(rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        Self {
            identity: format!("anon-{}", now.timestamp_millis()),
            display_label: anonymous_callsign(rng),
            anonymous: true,
            deployed_at: now,
            last_seen: now,
        }
    }
}

const ADJECTIVES: &[&str] = &[
    "Mindful",
    "Brave",
    "Strong",
    "Wise",
    "Calm",
    "Focused",
    "Resilient",
    "Peaceful",
    "Bold",
    "Steady",
    "Thoughtful",
    "Determined",
    "Grounded",
    "Balanced",
    "Centered",
];

const NOUNS: &[&str] = &[
    "Warrior",
    "Guardian",
    "Explorer",
    "Seeker",
    "Builder",
    "Dreamer",
    "Fighter",
    "Thinker",
    "Creator",
    "Wanderer",
    "Student",
    "Brother",
    "Friend",
    "Mind",
    "Soul",
];

pub fn anonymous_callsign(rng: &mut impl Rng) -> String {
    let adjective = ADJECTIVES
        .choose(rng)
        .expect("adjective list is non-empty");
    let noun = NOUNS.choose(rng).expect("noun list is non-empty");
    format!("{adjective} {noun}")
}

/// Replaces any previous session.
pub fn login(vault: &Vault, session: Session) -> Result<Session> {
    vault.save_session(&session)?;
    Ok(session)
}

pub fn logout(vault: &Vault) -> Result<()> {
    vault.clear_session()
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::store::Vault;

    use super::{anonymous_callsign, login, logout, Session, ADJECTIVES, NOUNS};

    #[test]
    fn callsigns_come_from_the_fixed_word_lists() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let callsign = anonymous_callsign(&mut rng);
            let (adjective, noun) = callsign
                .split_once(' ')
                .expect("callsign should be two words");
            assert!(ADJECTIVES.contains(&adjective));
            assert!(NOUNS.contains(&noun));
        }
    }

    #[test]
    fn login_then_logout_round_trips_through_the_vault() -> Result<()> {
        let dir = tempdir()?;
        let vault = Vault::open(dir.path())?;
        assert_eq!(vault.session()?, None);

        let now = Utc.with_ymd_and_hms(2024, 4, 5, 7, 0, 0).unwrap();
        let session = login(&vault, Session::named("Nightwatch", now))?;
        assert_eq!(vault.session()?, Some(session.clone()));
        assert!(!session.anonymous);

        // A second login replaces, never stacks.
        let replacement = login(&vault, Session::anonymous(&mut rand::thread_rng(), now))?;
        assert_eq!(vault.session()?, Some(replacement));

        logout(&vault)?;
        assert_eq!(vault.session()?, None);
        Ok(())
    }
}
