use battle_core::{CombatConfig, CompanionTemplate, MonsterDef};

/// Everything a battle driver needs from content, fully loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentBundle {
    pub companions: Vec<(String, CompanionTemplate)>,
    pub encounters: Vec<(String, Vec<MonsterDef>)>,
    pub config: CombatConfig,
}

impl ContentBundle {
    pub fn companion(&self, id: &str) -> Option<&CompanionTemplate> {
        self.companions
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, template)| template)
    }

    pub fn encounter(&self, id: &str) -> Option<&[MonsterDef]> {
        self.encounters
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, monsters)| monsters.as_slice())
    }

    /// Companion ids in catalog order.
    pub fn companion_ids(&self) -> impl Iterator<Item = &str> {
        self.companions.iter().map(|(id, _)| id.as_str())
    }

    pub fn encounter_ids(&self) -> impl Iterator<Item = &str> {
        self.encounters.iter().map(|(id, _)| id.as_str())
    }
}
