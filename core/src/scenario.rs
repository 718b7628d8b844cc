//! Named scenario records consumed by scenario loaders.

use serde::{Deserialize, Serialize};

use crate::GridSnapshot;

/// Named grid layout that can be loaded wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier used to select the scenario.
    pub id: String,
    /// Short display name.
    pub name: String,
    /// One-line explanation of what the scenario demonstrates.
    #[serde(default)]
    pub description: String,
    /// Occupancy lists applied through a bulk snapshot load.
    pub entities: GridSnapshot,
}

/// Collection of scenarios as stored in a catalog document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    /// Scenarios in catalog order.
    pub scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Looks up a scenario by identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::ScenarioCatalog;
    use crate::CellCoord;

    #[test]
    fn catalog_parses_scenario_documents() {
        let json = r#"{
            "scenarios": [
                {
                    "id": "corridor",
                    "name": "Corridor",
                    "description": "A single enemy down a corridor.",
                    "entities": {
                        "players": [{ "x": 0, "y": 0 }],
                        "enemies": [{ "x": 4, "y": 0 }],
                        "obstacles": [],
                        "walls": [{ "x": 2, "y": 1 }]
                    }
                },
                {
                    "id": "empty",
                    "name": "Empty",
                    "entities": {}
                }
            ]
        }"#;

        let catalog: ScenarioCatalog = serde_json::from_str(json).expect("catalog parses");
        assert_eq!(catalog.scenarios.len(), 2);

        let corridor = catalog.find("corridor").expect("corridor present");
        assert_eq!(corridor.entities.players, vec![CellCoord::new(0, 0)]);
        assert_eq!(corridor.entities.walls, vec![CellCoord::new(2, 1)]);

        let empty = catalog.find("empty").expect("empty present");
        assert!(empty.description.is_empty());
        assert_eq!(empty.entities.entries().count(), 0);
        assert!(catalog.find("missing").is_none());
    }
}
