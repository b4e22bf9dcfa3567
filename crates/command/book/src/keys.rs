//! Key bindings for the Angelic Buster command book.

use command_core::Key;

/// Keys bound to each movement input and skill in game.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: Key,
    pub flash_jump: Key,

    /// Reusable every routine loop.
    pub star_gazer: Key,
    pub roll_of_dice: Key,

    pub celestial_roar: Key,
    pub supernova: Key,
    pub erda_fountain: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: Key::from("space"),
            flash_jump: Key::from("space"),
            star_gazer: Key::from("t"),
            roll_of_dice: Key::from("u"),
            celestial_roar: Key::from("x"),
            supernova: Key::from("pgup"),
            erda_fountain: Key::from("5"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_and_flash_jump_share_a_key_by_default() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.jump, bindings.flash_jump);
        assert_eq!(bindings.supernova, Key::from("pgup"));
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn partial_ron_keeps_remaining_defaults() {
        let bindings: KeyBindings = ron::from_str(r#"(supernova: "6", jump: "alt")"#).unwrap();
        assert_eq!(bindings.supernova, Key::from("6"));
        assert_eq!(bindings.jump, Key::from("alt"));
        assert_eq!(bindings.flash_jump, Key::from("space"));
    }
}
