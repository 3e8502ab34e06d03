/// Where the page is in the proposal. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InteractionState {
    #[default]
    Asking,
    Accepted,
    Revealed,
}

impl InteractionState {
    /// `Asking -> Accepted`. Returns false (and changes nothing) from any other state.
    pub fn accept(&mut self) -> bool {
        if *self != InteractionState::Asking {
            return false;
        }
        *self = InteractionState::Accepted;
        true
    }

    /// `Accepted -> Revealed`. Returns false (and changes nothing) from any other state.
    pub fn reveal(&mut self) -> bool {
        if *self != InteractionState::Accepted {
            return false;
        }
        *self = InteractionState::Revealed;
        true
    }

    pub fn is_asking(&self) -> bool {
        *self == InteractionState::Asking
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Asking => "asking",
            InteractionState::Accepted => "accepted",
            InteractionState::Revealed => "revealed",
        }
    }
}
