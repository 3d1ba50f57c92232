//! The two fixed step sequences.
use crate::providers::Providers;
use crate::steps::{
    CloudProjectStep, DeployLinkStep, FinishStep, RegistryTokenStep, RuntimeModeStep, Step,
};

pub type Sequence = Vec<Box<dyn Step>>;

/// Full onboarding: runtime mode, cloud project, deploy link, registry token.
pub fn setup_sequence(providers: &Providers) -> Sequence {
    vec![
        Box::new(RuntimeModeStep::new(providers)) as Box<dyn Step>,
        Box::new(CloudProjectStep::new(providers)) as Box<dyn Step>,
        Box::new(DeployLinkStep::new(providers)) as Box<dyn Step>,
        Box::new(RegistryTokenStep::new(providers)) as Box<dyn Step>,
        Box::new(FinishStep::new(providers)) as Box<dyn Step>,
    ]
}

/// Cloud project and deploy link only.
pub fn link_sequence(providers: &Providers) -> Sequence {
    vec![
        Box::new(CloudProjectStep::new(providers)) as Box<dyn Step>,
        Box::new(DeployLinkStep::new(providers)) as Box<dyn Step>,
        Box::new(FinishStep::new(providers)) as Box<dyn Step>,
    ]
}
