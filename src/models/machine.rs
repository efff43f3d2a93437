use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
pub enum MachineCondition {
    #[default]
    Good,
    Damaged,
    #[serde(rename = "Needs Maintenance")]
    NeedsMaintenance,
}

impl MachineCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineCondition::Good => "Good",
            MachineCondition::Damaged => "Damaged",
            MachineCondition::NeedsMaintenance => "Needs Maintenance",
        }
    }
}

impl fmt::Display for MachineCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineCondition {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Good" => Ok(MachineCondition::Good),
            "Damaged" => Ok(MachineCondition::Damaged),
            "Needs Maintenance" => Ok(MachineCondition::NeedsMaintenance),
            other => Err(format!("Unknown machine condition: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub stock_availability: i32,
    pub rental_costs: f64,
    pub category: String,
    pub description: String,
    pub brand: String,
    pub condition: MachineCondition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct MachineRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_availability: i32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub rental_costs: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub brand: String,
    #[serde(default)]
    pub condition: MachineCondition,
}

/// Merge-patch body: only the fields present are written.
#[derive(Deserialize, Debug, Clone, Default, Validate, JsonSchema)]
pub struct MachineUpdateRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub stock_availability: Option<i32>,
    #[validate(range(min = 0.0))]
    pub rental_costs: Option<f64>,
    pub category: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    pub condition: Option<MachineCondition>,
}

impl MachineUpdateRequest {
    pub fn apply_to(&self, machine: &mut Machine) {
        if let Some(name) = &self.name {
            machine.name = name.clone();
        }
        if let Some(stock) = self.stock_availability {
            machine.stock_availability = stock;
        }
        if let Some(cost) = self.rental_costs {
            machine.rental_costs = cost;
        }
        if let Some(category) = &self.category {
            machine.category = category.clone();
        }
        if let Some(description) = &self.description {
            machine.description = description.clone();
        }
        if let Some(brand) = &self.brand {
            machine.brand = brand.clone();
        }
        if let Some(condition) = self.condition {
            machine.condition = condition;
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct MachineResponse {
    pub id: i64,
    pub name: String,
    pub stock_availability: i32,
    pub rental_costs: f64,
    pub category: String,
    pub description: String,
    pub brand: String,
    pub condition: MachineCondition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Machine> for MachineResponse {
    fn from(machine: &Machine) -> Self {
        Self {
            id: machine.id,
            name: machine.name.clone(),
            stock_availability: machine.stock_availability,
            rental_costs: machine.rental_costs,
            category: machine.category.clone(),
            description: machine.description.clone(),
            brand: machine.brand.clone(),
            condition: machine.condition,
            created_at: machine.created_at,
            updated_at: machine.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_machine;
    use proptest::prelude::*;

    #[test]
    fn partial_update_changes_only_supplied_fields() {
        let mut machine = sample_machine(1, "Drill");
        machine.stock_availability = 5;
        machine.rental_costs = 10.0;

        let patch = MachineUpdateRequest {
            stock_availability: Some(3),
            ..MachineUpdateRequest::default()
        };
        patch.apply_to(&mut machine);

        assert_eq!(machine.name, "Drill");
        assert_eq!(machine.stock_availability, 3);
        assert_eq!(machine.rental_costs, 10.0);
    }

    #[test]
    fn create_request_defaults() {
        let request: MachineRequest = serde_json::from_str(r#"{"name": "Drill"}"#).unwrap();
        assert_eq!(request.category, DEFAULT_CATEGORY);
        assert_eq!(request.condition, MachineCondition::Good);
        assert_eq!(request.stock_availability, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn condition_uses_display_names_on_the_wire() {
        let condition: MachineCondition = serde_json::from_str(r#""Needs Maintenance""#).unwrap();
        assert_eq!(condition, MachineCondition::NeedsMaintenance);
        assert_eq!(serde_json::to_string(&MachineCondition::Damaged).unwrap(), r#""Damaged""#);
        assert!(serde_json::from_str::<MachineCondition>(r#""Broken""#).is_err());
    }

    #[test]
    fn response_carries_every_stored_field() {
        let mut machine = sample_machine(9, "Compactor");
        machine.condition = MachineCondition::NeedsMaintenance;

        let body = serde_json::to_value(MachineResponse::from(&machine)).unwrap();

        assert_eq!(body["id"], 9);
        assert_eq!(body["name"], "Compactor");
        assert_eq!(body["stock_availability"], machine.stock_availability);
        assert_eq!(body["rental_costs"], machine.rental_costs);
        assert_eq!(body["category"], machine.category);
        assert_eq!(body["description"], machine.description);
        assert_eq!(body["brand"], machine.brand);
        assert_eq!(body["condition"], "Needs Maintenance");
        assert_eq!(body.as_object().unwrap().len(), 10);
    }

    #[test]
    fn condition_round_trips_through_storage_text() {
        for condition in [MachineCondition::Good, MachineCondition::Damaged, MachineCondition::NeedsMaintenance] {
            assert_eq!(condition.as_str().parse::<MachineCondition>(), Ok(condition));
        }
        assert!("Broken".parse::<MachineCondition>().is_err());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let patch = MachineUpdateRequest {
            stock_availability: Some(-1),
            ..MachineUpdateRequest::default()
        };
        assert!(patch.validate().is_err());
    }

    proptest! {
        #[test]
        fn empty_patch_is_identity(stock in 0i32..10_000, cost in 0.0f64..1_000.0) {
            let mut machine = sample_machine(9, "Grinder");
            machine.stock_availability = stock;
            machine.rental_costs = cost;
            let before = machine.clone();

            MachineUpdateRequest::default().apply_to(&mut machine);
            prop_assert_eq!(machine, before);
        }
    }
}
