//! Combat message selection.
//!
//! Choosing the template is a pure function of the numbers involved, kept
//! apart from rendering so it can be checked without strings.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Narration {
    /// No defender was hit.
    Miss,
    NoDamage,
    KillingBlow { damage: i32 },
    Hit { damage: i32 },
}

impl Narration {
    /// `damage` is `None` when the attack found nobody to hit.
    pub fn select(damage: Option<i32>, killing_blow: bool) -> Self {
        match damage {
            None => Narration::Miss,
            Some(d) if d <= 0 => Narration::NoDamage,
            Some(damage) if killing_blow => Narration::KillingBlow { damage },
            Some(damage) => Narration::Hit { damage },
        }
    }

    /// Renders the message. Player names stand alone; monster names take an
    /// article.
    pub fn render(
        self,
        attacker: &str,
        attacker_is_player: bool,
        verb: &str,
        defender: &str,
        defender_is_player: bool,
    ) -> String {
        let subject = if attacker_is_player {
            attacker.to_string()
        } else {
            format!("The {attacker}")
        };
        let object = if defender_is_player {
            defender.to_string()
        } else {
            format!("the {defender}")
        };
        let pronoun = if defender_is_player { "them" } else { "it" };

        match self {
            Narration::Miss => format!("{subject} misses."),
            Narration::NoDamage => format!("{subject} {verb} {object} but does no damage."),
            Narration::KillingBlow { damage } => {
                format!("{subject} {verb} {object} and kills {pronoun} with {damage} damage.")
            }
            Narration::Hit { damage } => {
                format!("{subject} {verb} {object} for {damage} damage.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_order() {
        assert_eq!(Narration::select(None, false), Narration::Miss);
        assert_eq!(Narration::select(Some(0), true), Narration::NoDamage);
        assert_eq!(
            Narration::select(Some(4), true),
            Narration::KillingBlow { damage: 4 }
        );
        assert_eq!(
            Narration::select(Some(4), false),
            Narration::Hit { damage: 4 }
        );
    }

    #[test]
    fn monster_on_monster_text_is_complete() {
        let text =
            Narration::KillingBlow { damage: 7 }.render("ogre", false, "hits", "goblin", false);
        assert_eq!(text, "The ogre hits the goblin and kills it with 7 damage.");
        let text = Narration::Hit { damage: 3 }.render("Ash", true, "slashes at", "rat", false);
        assert_eq!(text, "Ash slashes at the rat for 3 damage.");
        let text = Narration::NoDamage.render("rat", false, "bites", "Ash", true);
        assert_eq!(text, "The rat bites Ash but does no damage.");
    }

    #[test]
    fn killing_blow_on_the_player_keeps_the_damage() {
        let text =
            Narration::KillingBlow { damage: 12 }.render("ogre", false, "clubs", "Ash", true);
        assert_eq!(text, "The ogre clubs Ash and kills them with 12 damage.");
    }
}
