//! Module providing JSON input for profondeur Models
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metabolic_model::compartment::Compartment;
use crate::metabolic_model::metabolite::{Metabolite, MetaboliteBuilder, MetaboliteBuilderError};
use crate::metabolic_model::model::{Model, ModelError};
use crate::metabolic_model::process::Process;
use crate::metabolic_model::reaction::{
    derive_operation, Operation, Participant, ReactionBuilder, ReactionBuilderError, Role,
    Transport,
};

// region JSON Model
/// Represents a JSON serialized model, used for reading models in json format
#[derive(Serialize, Deserialize)]
struct JsonModel {
    id: Option<String>,
    #[serde(default)]
    compartments: Vec<JsonEntity>,
    #[serde(default)]
    processes: Vec<JsonEntity>,
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
}

/// Compartments and processes only carry an identifier and a name
#[derive(Serialize, Deserialize)]
struct JsonEntity {
    id: String,
    name: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    formula: Option<String>,
    charge: Option<i32>,
    #[serde(default)]
    compartments: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    participants: Vec<JsonParticipant>,
    conversion: Option<bool>,
    transport: Option<bool>,
    transports: Option<Vec<JsonTransport>>,
    replicates: Option<Vec<String>>,
    #[serde(default)]
    processes: Vec<String>,
    #[serde(default)]
    reversibility: bool,
}

#[derive(Serialize, Deserialize)]
struct JsonParticipant {
    metabolite: String,
    compartment: String,
    role: Role,
    #[serde(default = "default_coefficient")]
    coefficient: f64,
}

fn default_coefficient() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize)]
struct JsonTransport {
    metabolite: String,
    compartments: Vec<String>,
}
// endregion JSON Model

// region Conversions
impl From<JsonEntity> for Compartment {
    fn from(c: JsonEntity) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

impl From<JsonEntity> for Process {
    fn from(p: JsonEntity) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

impl From<JsonParticipant> for Participant {
    fn from(p: JsonParticipant) -> Self {
        Self {
            metabolite: p.metabolite,
            compartment: p.compartment,
            role: p.role,
            coefficient: p.coefficient,
        }
    }
}

impl From<JsonTransport> for Transport {
    fn from(t: JsonTransport) -> Self {
        Self {
            metabolite: t.metabolite,
            compartments: t.compartments,
        }
    }
}

impl TryFrom<JsonMetabolite> for Metabolite {
    type Error = MetaboliteBuilderError;

    fn try_from(m: JsonMetabolite) -> Result<Self, Self::Error> {
        MetaboliteBuilder::default()
            .id(m.id)
            .name(m.name)
            .formula(m.formula)
            .charge(m.charge.unwrap_or_default())
            .compartments(m.compartments)
            .build()
    }
}

/// Resolve the operation of a reaction document
///
/// Flags and transports the document omits are derived from the participants.
fn json_operation(
    participants: &[Participant],
    conversion: Option<bool>,
    transport: Option<bool>,
    transports: Option<Vec<JsonTransport>>,
) -> Operation {
    let derived = derive_operation(participants);
    let transports: Vec<Transport> = match transports {
        Some(transports) => transports.into_iter().map(Transport::from).collect(),
        None => derived.transports().to_vec(),
    };
    let conversion = conversion.unwrap_or_else(|| derived.is_conversion());
    let transport = transport.unwrap_or(!transports.is_empty());
    Operation::from_flags(conversion, transport, transports)
}

impl Model {
    /// Read a model from a JSON file
    ///
    /// Reactions that reference unknown metabolites or compartments are excluded and
    /// recorded in [`Model::inconsistencies`] rather than failing the whole read.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        Model::from_json_str(&model_str)
    }

    /// Read a model from a JSON string
    pub fn from_json_str(model_str: &str) -> Result<Model, JsonError> {
        let json_model = match serde_json::from_str::<JsonModel>(model_str) {
            Ok(model) => model,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Model::from_json(json_model)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut model = Model::new_empty();
        model.id = json_model.id;
        // Identifiers of the reference entities must be unique, so these errors are fatal
        for compartment in json_model.compartments {
            model.add_compartment(Compartment::from(compartment))?;
        }
        for process in json_model.processes {
            model.add_process(Process::from(process))?;
        }
        for metabolite in json_model.metabolites {
            model.add_metabolite(Metabolite::try_from(metabolite)?)?;
        }
        for rxn in json_model.reactions {
            let participants: Vec<Participant> =
                rxn.participants.into_iter().map(Participant::from).collect();
            let operation =
                json_operation(&participants, rxn.conversion, rxn.transport, rxn.transports);
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id)
                .name(rxn.name)
                .participants(participants)
                .processes(rxn.processes)
                .reversibility(rxn.reversibility)
                .operation(operation)
                .replicates(rxn.replicates.unwrap_or_default())
                .build()?;
            model.add_reaction_or_record(new_reaction);
        }
        if !model.declares_replicates() {
            model.derive_replicates();
        }
        model.include_transport_processes();
        log::info!(
            "Read model {} with {} reactions, {} metabolites, {} compartments, {} processes ({} reactions excluded)",
            model.id.as_deref().unwrap_or("<unnamed>"),
            model.reactions.len(),
            model.metabolites.len(),
            model.compartments.len(),
            model.processes.len(),
            model.inconsistencies.len()
        );
        Ok(model)
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Unable to build metabolite")]
    UnableToBuildMetabolite(#[from] MetaboliteBuilderError),
    #[error("Model is invalid")]
    InvalidModel(#[from] ModelError),
}

// endregion Conversions

#[cfg(test)]
mod json_tests {
    use super::*;
    use std::path::PathBuf;

    fn small_model_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("test_models")
            .join("small_model.json")
    }

    #[test]
    fn json_reaction() {
        let data = r#"{
"id":"GLCt",
"name":"Glucose transport",
"participants":[
{"metabolite":"glc","compartment":"e","role":"reactant","coefficient":1.0},
{"metabolite":"glc","compartment":"c","role":"product"}
],
"processes":["glycolysis"]
}"#;
        let reaction: JsonReaction = serde_json::from_str(data).unwrap();
        assert_eq!(reaction.id, "GLCt");
        assert_eq!(reaction.participants.len(), 2);
        assert_eq!(reaction.participants[1].role, Role::Product);
        assert!((reaction.participants[1].coefficient - 1.0).abs() < 1e-25);
        assert!(reaction.conversion.is_none());
        assert!(reaction.replicates.is_none());
        assert!(!reaction.reversibility);
    }

    #[test]
    fn json_operation_derived() {
        let participants = vec![Participant::reactant("glc", "e"), Participant::product("glc", "c")];
        let operation = json_operation(&participants, None, None, None);
        assert!(matches!(operation, Operation::Transport { .. }));
        assert_eq!(operation.transports()[0].compartments, vec!["e", "c"]);
    }

    #[test]
    fn json_operation_declared() {
        let participants = vec![Participant::reactant("glc", "e"), Participant::product("glc", "c")];
        let operation = json_operation(
            &participants,
            Some(true),
            Some(false),
            Some(vec![]),
        );
        assert_eq!(operation, Operation::Conversion { transports: vec![] });
    }

    #[test]
    fn read_json() {
        let model = Model::read_json(small_model_path()).unwrap();
        assert_eq!(model.id.as_deref(), Some("small_model"));
        assert_eq!(model.compartments.len(), 3);
        assert_eq!(model.processes.len(), 2);
        assert_eq!(model.metabolites.len(), 6);
        // BAD references a compartment that isn't in the model
        assert_eq!(model.reactions.len(), 6);
        assert!(!model.reactions.contains_key("BAD"));
        assert_eq!(
            model.inconsistencies,
            vec![ModelError::InconsistentModel {
                reaction: "BAD".to_string(),
                reason: "unknown compartment x".to_string(),
            }]
        );

        let (_, met) = model.metabolites.first().unwrap();
        assert_eq!(met.id, "glc");
        assert_eq!(met.name.as_deref(), Some("D-Glucose"));
        assert_eq!(met.formula.as_deref(), Some("C6H12O6"));
        // Compartments follow the order in which reactions use them
        assert_eq!(met.compartments, vec!["e", "c", "m"]);

        let hex = &model.reactions["HEX1"];
        assert!(hex.operation.is_conversion());
        assert_eq!(hex.replicates, vec!["HEX1m".to_string()]);
        let glct = &model.reactions["GLCt"];
        assert!(matches!(glct.operation, Operation::Transport { .. }));
        // Joined glycolysis because glycolysis uses glucose outside and inside the cell
        assert!(glct.processes.contains(&"glycolysis".to_string()));
    }

    #[test]
    fn unreadable() {
        assert!(matches!(
            Model::read_json("no/such/model.json"),
            Err(JsonError::UnableToRead(_))
        ));
        assert!(matches!(
            Model::from_json_str("{\"metabolites\": 3}"),
            Err(JsonError::UnableToParse(_))
        ));
    }

    #[test]
    fn duplicate_metabolite() {
        let data = r#"{"metabolites":[{"id":"a"},{"id":"a"}],"reactions":[]}"#;
        assert!(matches!(
            Model::from_json_str(data),
            Err(JsonError::InvalidModel(ModelError::DuplicateIdentifier(_)))
        ));
    }
}
