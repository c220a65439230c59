use crate::parameters::GlobalParameters;
use serde::{Deserialize, Serialize};

/// Everything the UI layer may ask of the store.
/// Variants are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Run control ─────────────────────────────
    Start,
    Pause,
    Reset,
    SetSpeed { speed: u32 },

    // ── Parameters ──────────────────────────────
    /// `name` accepts snake_case or the UI's camelCase spelling.
    SetParameter { name: String, value: f64 },
    SetParameters { parameters: GlobalParameters },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_ui_json() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"cmd":"set_parameter","name":"taxRate","value":20}"#).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::SetParameter { name: "taxRate".into(), value: 20.0 }
        );

        let cmd: PlayerCommand = serde_json::from_str(r#"{"cmd":"start"}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::Start);
    }
}
