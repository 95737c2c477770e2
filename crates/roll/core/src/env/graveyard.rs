use crate::model::{Species, Unit};

/// Read access to players' dead-unit areas.
///
/// Implementations must be `Send + Sync`; the engine shares one instance
/// behind an `Arc`.
pub trait GraveyardOracle: Send + Sync {
    /// Dead units of `species` belonging to `player`.
    fn units_by_species(&self, player: &str, species: &Species) -> Vec<Unit>;
}

/// In-memory graveyard, one entry per player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraveyardSnapshot {
    pub players: Vec<PlayerGraveyard>,
}

/// Dead units of a single player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerGraveyard {
    pub player: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dead: Vec<Unit>,
}

impl GraveyardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dead unit for `player`.
    pub fn bury(&mut self, player: &str, unit: Unit) {
        match self.players.iter_mut().find(|entry| entry.player == player) {
            Some(entry) => entry.dead.push(unit),
            None => self.players.push(PlayerGraveyard {
                player: player.to_string(),
                dead: vec![unit],
            }),
        }
    }
}

impl GraveyardOracle for GraveyardSnapshot {
    fn units_by_species(&self, player: &str, species: &Species) -> Vec<Unit> {
        self.players
            .iter()
            .filter(|entry| entry.player == player)
            .flat_map(|entry| entry.dead.iter())
            .filter(|unit| &unit.species == species)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_filters_by_player_and_species() {
        let mut graveyard = GraveyardSnapshot::new();
        graveyard.bury("alice", Unit::new("Skeleton", Species::Undead, 1));
        graveyard.bury("alice", Unit::new("Goblin", Species::Goblins, 1));
        graveyard.bury("bob", Unit::new("Wraith", Species::Undead, 2));

        let dead = graveyard.units_by_species("alice", &Species::Undead);
        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0].name, "Skeleton");
        assert!(graveyard.units_by_species("carol", &Species::Undead).is_empty());
    }
}
