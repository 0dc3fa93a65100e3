//! Well-known ids shared by the bundled actions.

pub mod vars {
    use goap_core::AiVar;

    pub const IS_NEAR: AiVar = AiVar::named("IsNear");
    pub const IS_DECONSTRUCTED: AiVar = AiVar::named("IsDeconstructed");
    pub const IS_HARVESTED: AiVar = AiVar::named("IsHarvested");
}

pub mod abilities {
    use crate::AbilityId;

    pub const MOVE: AbilityId = AbilityId::named("Move");
    pub const WORK: AbilityId = AbilityId::named("Work");
    pub const BUILD: AbilityId = AbilityId::named("Build");
    pub const MANIPULATE: AbilityId = AbilityId::named("Manipulate");
}

pub mod jobs {
    use goap_goals::JobTypeId;

    pub const DEMOLITION: JobTypeId = JobTypeId::named("Demolition");
    pub const PLANTS: JobTypeId = JobTypeId::named("Plants");
}
