//! Buffs and attack skills.
//!
//! Every timed skill is a [`CooldownGatedAction`]. The intervals below are
//! what the routine waits between casts, not the in-game cooldowns: Roll of
//! Dice has a 180s cooldown but is recast after 65s, and Supernova and Erda
//! Fountain share a 60s cooldown but are offset by a second so they are not
//! cast on the same tick.

use std::time::Duration;

use command_core::{
    AttackBurst, ConfigError, CooldownGatedAction, GatedAbility, HorizontalDirection,
};

use crate::KeyBindings;

pub const ROLL_OF_DICE_INTERVAL: Duration = Duration::from_secs(65);
pub const STAR_GAZER_INTERVAL: Duration = Duration::from_secs(200);
pub const SUPERNOVA_INTERVAL: Duration = Duration::from_secs(60);
pub const ERDA_FOUNTAIN_INTERVAL: Duration = Duration::from_secs(61);

const BUFF_PRESSES: u32 = 2;
const SKILL_PRESSES: u32 = 3;

/// Casts Roll of Dice and Star Gazer whenever each is due.
pub fn buff(bindings: &KeyBindings) -> CooldownGatedAction {
    CooldownGatedAction::new("buff")
        .with_ability(GatedAbility::new(
            "roll_of_dice",
            bindings.roll_of_dice.clone(),
            BUFF_PRESSES,
            ROLL_OF_DICE_INTERVAL,
        ))
        .with_ability(GatedAbility::new(
            "star_gazer",
            bindings.star_gazer.clone(),
            BUFF_PRESSES,
            STAR_GAZER_INTERVAL,
        ))
}

/// Spams Celestial Roar on the spot.
pub fn celestial_roar(bindings: &KeyBindings, attacks: u32, repetitions: u32) -> AttackBurst {
    AttackBurst::new(
        "celestial_roar",
        bindings.celestial_roar.clone(),
        attacks,
        repetitions,
    )
}

/// Casts Supernova every 60s, facing `direction` or the screen center.
pub fn supernova(
    bindings: &KeyBindings,
    direction: Option<&str>,
) -> Result<CooldownGatedAction, ConfigError> {
    directional(
        "supernova",
        bindings.supernova.clone(),
        SUPERNOVA_INTERVAL,
        direction,
    )
}

/// Casts Erda Fountain every 61s, facing `direction` or the screen center.
pub fn erda_fountain(
    bindings: &KeyBindings,
    direction: Option<&str>,
) -> Result<CooldownGatedAction, ConfigError> {
    directional(
        "erda_fountain",
        bindings.erda_fountain.clone(),
        ERDA_FOUNTAIN_INTERVAL,
        direction,
    )
}

fn directional(
    name: &'static str,
    key: command_core::Key,
    interval: Duration,
    direction: Option<&str>,
) -> Result<CooldownGatedAction, ConfigError> {
    let explicit = direction
        .map(HorizontalDirection::parse_arrow)
        .transpose()?;
    let ability = GatedAbility::new(name, key, SKILL_PRESSES, interval).facing(explicit);
    Ok(CooldownGatedAction::single(name, ability))
}

#[cfg(test)]
mod tests {
    use command_core::{Facing, Key};

    use super::*;

    #[test]
    fn buff_gates_two_abilities_with_distinct_intervals() {
        let action = buff(&KeyBindings::default());
        let intervals: Vec<_> = action
            .abilities()
            .iter()
            .map(|ability| (ability.name(), ability.timer().interval()))
            .collect();
        assert_eq!(
            intervals,
            vec![
                ("roll_of_dice", Duration::from_secs(65)),
                ("star_gazer", Duration::from_secs(200)),
            ]
        );
        assert!(
            action
                .abilities()
                .iter()
                .all(|ability| ability.facing_mode() == Facing::Unchanged)
        );
    }

    #[test]
    fn supernova_and_erda_fountain_stay_offset() {
        let bindings = KeyBindings::default();
        let nova = supernova(&bindings, None).unwrap();
        let erda = erda_fountain(&bindings, None).unwrap();
        assert_ne!(
            nova.abilities()[0].timer().interval(),
            erda.abilities()[0].timer().interval()
        );
    }

    #[test]
    fn explicit_direction_is_kept() {
        let nova = supernova(&KeyBindings::default(), Some("left")).unwrap();
        let ability = &nova.abilities()[0];
        assert_eq!(
            ability.facing_mode(),
            Facing::Toward(Some(HorizontalDirection::Left))
        );
        assert_eq!(ability.key(), &Key::from("pgup"));
        assert_eq!(ability.presses(), 3);
    }

    #[test]
    fn vertical_or_unknown_directions_are_rejected() {
        let bindings = KeyBindings::default();
        assert!(matches!(
            supernova(&bindings, Some("up")),
            Err(ConfigError::InvalidDirection { .. })
        ));
        assert!(matches!(
            erda_fountain(&bindings, Some("diagonal")),
            Err(ConfigError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn celestial_roar_uses_bound_key() {
        let roar = celestial_roar(&KeyBindings::default(), 4, 2);
        assert_eq!(roar.attacks(), 4);
        assert_eq!(roar.repetitions(), 2);
    }
}
