//! This module provides the Model struct for representing an entire metabolic model
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::metabolic_model::compartment::Compartment;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::process::Process;
use crate::metabolic_model::reaction::{Reaction, Role};

/// Represents a metabolic model, loaded once and only read afterwards
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Id associated with the Model
    pub id: Option<String>,
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of compartment ids to Compartment Objects
    pub compartments: IndexMap<String, Compartment>,
    /// Map of process ids to Process Objects
    pub processes: IndexMap<String, Process>,
    /// Reactions that were excluded while loading because they don't agree with the rest of
    /// the model
    pub inconsistencies: Vec<ModelError>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model::default()
    }

    /// Add a metabolite to the model
    pub fn add_metabolite(&mut self, metabolite: Metabolite) -> Result<(), ModelError> {
        if self.metabolites.contains_key(&metabolite.id) {
            return Err(ModelError::DuplicateIdentifier(metabolite.id));
        }
        self.metabolites.insert(metabolite.id.clone(), metabolite);
        Ok(())
    }

    /// Add a compartment to the model
    pub fn add_compartment(&mut self, compartment: Compartment) -> Result<(), ModelError> {
        if self.compartments.contains_key(&compartment.id) {
            return Err(ModelError::DuplicateIdentifier(compartment.id));
        }
        self.compartments.insert(compartment.id.clone(), compartment);
        Ok(())
    }

    /// Add a process to the model
    pub fn add_process(&mut self, process: Process) -> Result<(), ModelError> {
        if self.processes.contains_key(&process.id) {
            return Err(ModelError::DuplicateIdentifier(process.id));
        }
        self.processes.insert(process.id.clone(), process);
        Ok(())
    }

    /// Add a reaction to the model
    ///
    /// Every participant must reference a metabolite and a compartment that are already in
    /// the model. The compartments of the participating metabolites are updated.
    ///
    /// # Examples
    /// ```rust
    /// use profondeur_core::metabolic_model::compartment::Compartment;
    /// use profondeur_core::metabolic_model::metabolite::Metabolite;
    /// use profondeur_core::metabolic_model::model::Model;
    /// use profondeur_core::metabolic_model::reaction::{Participant, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// model.add_compartment(Compartment::new("c", Some("cytosol"))).unwrap();
    /// model.add_metabolite(Metabolite::new_id_only("a")).unwrap();
    /// model.add_metabolite(Metabolite::new_id_only("b")).unwrap();
    /// let new_reaction = ReactionBuilder::default()
    ///     .id("new_reaction".to_string())
    ///     .participants(vec![Participant::reactant("a", "c"), Participant::product("b", "c")])
    ///     .build()
    ///     .unwrap();
    /// model.add_reaction(new_reaction).unwrap();
    /// assert_eq!(model.metabolites["a"].compartments, vec!["c".to_string()]);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        if self.reactions.contains_key(&reaction.id) {
            return Err(ModelError::DuplicateIdentifier(reaction.id));
        }
        self.validate_reaction(&reaction)?;
        for participant in &reaction.participants {
            if let Some(metabolite) = self.metabolites.get_mut(&participant.metabolite) {
                metabolite.include_compartment(&participant.compartment);
            }
        }
        self.reactions.insert(reaction.id.clone(), reaction);
        Ok(())
    }

    fn validate_reaction(&self, reaction: &Reaction) -> Result<(), ModelError> {
        for participant in &reaction.participants {
            if !self.metabolites.contains_key(&participant.metabolite) {
                return Err(ModelError::InconsistentModel {
                    reaction: reaction.id.clone(),
                    reason: format!("unknown metabolite {}", participant.metabolite),
                });
            }
            if !self.compartments.contains_key(&participant.compartment) {
                return Err(ModelError::InconsistentModel {
                    reaction: reaction.id.clone(),
                    reason: format!("unknown compartment {}", participant.compartment),
                });
            }
        }
        Ok(())
    }

    /// Add a reaction, or record why it was excluded
    ///
    /// Used while loading so that one bad record doesn't abort the whole model.
    pub(crate) fn add_reaction_or_record(&mut self, reaction: Reaction) {
        if let Err(err) = self.add_reaction(reaction) {
            log::warn!("Excluding reaction from model: {}", err);
            self.inconsistencies.push(err);
        }
    }

    /// Whether any reaction declares replicates
    pub fn declares_replicates(&self) -> bool {
        self.reactions.values().any(|r| !r.replicates.is_empty())
    }

    /// Derive every reaction's replicates from its participants
    ///
    /// Reactions whose reactant metabolites and product metabolites are mutually inclusive
    /// are replicates of each other, regardless of compartments.
    pub fn derive_replicates(&mut self) {
        let mut groups: IndexMap<(Vec<String>, Vec<String>), Vec<String>> = IndexMap::new();
        for reaction in self.reactions.values() {
            let key = (
                sorted_metabolites(reaction, Role::Reactant),
                sorted_metabolites(reaction, Role::Product),
            );
            groups.entry(key).or_default().push(reaction.id.clone());
        }
        for members in groups.values().filter(|members| members.len() > 1) {
            for id in members {
                if let Some(reaction) = self.reactions.get_mut(id) {
                    reaction.replicates = members.iter().filter(|m| *m != id).cloned().collect();
                }
            }
        }
    }

    /// Include reactions in the processes they serve by transport
    ///
    /// A reaction joins a process when one of its transports moves a metabolite between at
    /// least two compartments in which the process' own reactions use that metabolite.
    pub fn include_transport_processes(&mut self) {
        // process -> metabolite -> compartments
        let mut dispersal: IndexMap<String, IndexMap<String, IndexSet<String>>> = IndexMap::new();
        for reaction in self.reactions.values() {
            for process in &reaction.processes {
                let metabolites = dispersal.entry(process.clone()).or_default();
                for participant in &reaction.participants {
                    metabolites
                        .entry(participant.metabolite.clone())
                        .or_default()
                        .insert(participant.compartment.clone());
                }
            }
        }
        for reaction in self.reactions.values_mut() {
            let mut joined: Vec<String> = Vec::new();
            for (process, metabolites) in &dispersal {
                let serves = reaction.transports().iter().any(|transport| {
                    metabolites
                        .get(&transport.metabolite)
                        .filter(|compartments| compartments.len() > 1)
                        .map(|compartments| {
                            transport
                                .compartments
                                .iter()
                                .filter(|c| compartments.contains(*c))
                                .count()
                                > 1
                        })
                        .unwrap_or(false)
                });
                if serves && !reaction.processes.contains(process) {
                    joined.push(process.clone());
                }
            }
            if !joined.is_empty() {
                log::debug!("Reaction {} joins processes {:?} by transport", reaction.id, joined);
                reaction.processes.extend(joined);
            }
        }
    }
}

fn sorted_metabolites(reaction: &Reaction, role: Role) -> Vec<String> {
    let mut metabolites: Vec<String> = reaction
        .metabolites_by_role(role)
        .into_iter()
        .map(String::from)
        .collect();
    metabolites.sort();
    metabolites
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Reaction {reaction} is inconsistent with the model: {reason}")]
    InconsistentModel { reaction: String, reason: String },
    #[error("Identifier {0} is already present in the model")]
    DuplicateIdentifier(String),
}

#[cfg(test)]
mod model_tests {
    use super::*;
    use crate::metabolic_model::reaction::{Participant, ReactionBuilder};

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        for compartment in ["c", "e", "m"] {
            model.add_compartment(Compartment::new(compartment, None)).unwrap();
        }
        for metabolite in ["a", "b", "glc"] {
            model.add_metabolite(Metabolite::new_id_only(metabolite)).unwrap();
        }
        model.add_process(Process::new("glycolysis", None)).unwrap();
        return model;
    }

    fn reaction(id: &str, participants: Vec<Participant>, processes: &[&str]) -> Reaction {
        ReactionBuilder::default()
            .id(id.to_string())
            .participants(participants)
            .processes(processes.iter().map(|p| p.to_string()).collect())
            .build()
            .unwrap()
    }

    #[test]
    fn unknown_metabolite() {
        let mut model = setup_model();
        let result = model.add_reaction(reaction(
            "R1",
            vec![Participant::reactant("a", "c"), Participant::product("zzz", "c")],
            &[],
        ));
        assert_eq!(
            result,
            Err(ModelError::InconsistentModel {
                reaction: "R1".to_string(),
                reason: "unknown metabolite zzz".to_string(),
            })
        );
        assert!(model.reactions.is_empty());
    }

    #[test]
    fn unknown_compartment_is_recorded() {
        let mut model = setup_model();
        model.add_reaction_or_record(reaction(
            "R1",
            vec![Participant::reactant("a", "x"), Participant::product("b", "c")],
            &[],
        ));
        model.add_reaction_or_record(reaction(
            "R2",
            vec![Participant::reactant("a", "c"), Participant::product("b", "c")],
            &[],
        ));
        assert_eq!(model.reactions.len(), 1);
        assert_eq!(model.inconsistencies.len(), 1);
        assert!(model.reactions.contains_key("R2"));
    }

    #[test]
    fn duplicate_identifier() {
        let mut model = setup_model();
        assert_eq!(
            model.add_metabolite(Metabolite::new_id_only("a")),
            Err(ModelError::DuplicateIdentifier("a".to_string()))
        );
    }

    #[test]
    fn replicates_by_participants() {
        let mut model = setup_model();
        model
            .add_reaction(reaction(
                "R1",
                vec![Participant::reactant("a", "c"), Participant::product("b", "c")],
                &[],
            ))
            .unwrap();
        model
            .add_reaction(reaction(
                "R2",
                vec![Participant::reactant("a", "m"), Participant::product("b", "m")],
                &[],
            ))
            .unwrap();
        model
            .add_reaction(reaction(
                "R3",
                vec![Participant::reactant("b", "c"), Participant::product("a", "c")],
                &[],
            ))
            .unwrap();
        assert!(!model.declares_replicates());
        model.derive_replicates();
        assert_eq!(model.reactions["R1"].replicates, vec!["R2".to_string()]);
        assert_eq!(model.reactions["R2"].replicates, vec!["R1".to_string()]);
        assert!(model.reactions["R3"].replicates.is_empty());
        assert!(model.declares_replicates());
    }

    #[test]
    fn transport_processes() {
        let mut model = setup_model();
        // glycolysis uses glucose in both the cytosol and the extracellular space
        model
            .add_reaction(reaction(
                "HEX",
                vec![Participant::reactant("glc", "c"), Participant::product("a", "c")],
                &["glycolysis"],
            ))
            .unwrap();
        model
            .add_reaction(reaction(
                "EXCH",
                vec![Participant::reactant("glc", "e"), Participant::product("b", "e")],
                &["glycolysis"],
            ))
            .unwrap();
        model
            .add_reaction(reaction(
                "GLCt",
                vec![Participant::reactant("glc", "e"), Participant::product("glc", "c")],
                &[],
            ))
            .unwrap();
        model
            .add_reaction(reaction(
                "GLCm",
                vec![Participant::reactant("glc", "c"), Participant::product("glc", "m")],
                &[],
            ))
            .unwrap();
        model.include_transport_processes();
        assert_eq!(model.reactions["GLCt"].processes, vec!["glycolysis".to_string()]);
        assert!(model.reactions["GLCm"].processes.is_empty());
        // Idempotent
        model.include_transport_processes();
        assert_eq!(model.reactions["GLCt"].processes, vec!["glycolysis".to_string()]);
    }
}
