use serde::{Deserialize, Deserializer, Serialize};

/// Capability class of a room participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// May publish audio into the room
    Broadcaster,
    #[default]
    Listener,
}

impl ParticipantRole {
    /// Only the exact string `broadcaster` grants publishing
    #[must_use]
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("broadcaster") => Self::Broadcaster,
            _ => Self::Listener,
        }
    }

    #[must_use]
    pub const fn can_publish(self) -> bool {
        matches!(self, Self::Broadcaster)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Broadcaster => "broadcaster",
            Self::Listener => "listener",
        }
    }
}

impl<'de> Deserialize<'de> for ParticipantRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_wire(value.as_ref().and_then(serde_json::Value::as_str)))
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default)]
        role: ParticipantRole,
    }

    #[test]
    fn test_from_wire() {
        assert_eq!(ParticipantRole::from_wire(Some("broadcaster")), ParticipantRole::Broadcaster);
        assert_eq!(ParticipantRole::from_wire(Some("listener")), ParticipantRole::Listener);
        assert_eq!(ParticipantRole::from_wire(Some("Broadcaster")), ParticipantRole::Listener);
        assert_eq!(ParticipantRole::from_wire(None), ParticipantRole::Listener);
    }

    #[test]
    fn test_lenient_deserialize() {
        let parse = |json: &str| serde_json::from_str::<Body>(json).unwrap().role;

        assert_eq!(parse(r#"{"role":"broadcaster"}"#), ParticipantRole::Broadcaster);
        assert_eq!(parse(r#"{"role":"admin"}"#), ParticipantRole::Listener);
        assert_eq!(parse(r#"{"role":null}"#), ParticipantRole::Listener);
        assert_eq!(parse(r#"{"role":5}"#), ParticipantRole::Listener);
        assert_eq!(parse("{}"), ParticipantRole::Listener);
    }

    #[test]
    fn test_capabilities() {
        assert!(ParticipantRole::Broadcaster.can_publish());
        assert!(!ParticipantRole::Listener.can_publish());
        assert_eq!(ParticipantRole::Broadcaster.to_string(), "broadcaster");
    }
}
