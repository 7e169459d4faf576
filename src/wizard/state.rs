/// Whether a selection step was entered on its own or as part of the
/// provider → model → API key cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Standalone,
    Cascade,
}

/// Where the wizard goes next. Each step returns the following state, so
/// the cascade is data carried here rather than a flag threaded through calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Top-level menu.
    Idle,
    SelectingProvider,
    SelectingModel(Flow),
    SelectingApiKey(Flow),
    /// "Keep editing or export?" after a standalone selection.
    NextStep,
    Committing,
    Viewing,
    ValidatingKeys,
    Done,
}

impl WizardState {
    pub fn is_terminal(self) -> bool {
        self == Self::Done
    }
}

/// Entries of the top-level menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SelectProvider,
    SelectModel,
    SelectApiKey,
    Export,
    View,
    ValidateKeys,
    Exit,
}

impl MenuAction {
    pub const ALL: [Self; 7] = [
        Self::SelectProvider,
        Self::SelectModel,
        Self::SelectApiKey,
        Self::Export,
        Self::View,
        Self::ValidateKeys,
        Self::Exit,
    ];

    pub fn label(self) -> String {
        match self {
            Self::SelectProvider => t!("wizard.menu.select_provider"),
            Self::SelectModel => t!("wizard.menu.select_model"),
            Self::SelectApiKey => t!("wizard.menu.select_api_key"),
            Self::Export => t!("wizard.menu.export"),
            Self::View => t!("wizard.menu.view"),
            Self::ValidateKeys => t!("wizard.menu.validate_keys"),
            Self::Exit => t!("wizard.menu.exit"),
        }
        .to_string()
    }

    pub fn target(self) -> WizardState {
        match self {
            Self::SelectProvider => WizardState::SelectingProvider,
            Self::SelectModel => WizardState::SelectingModel(Flow::Standalone),
            Self::SelectApiKey => WizardState::SelectingApiKey(Flow::Standalone),
            Self::Export => WizardState::Committing,
            Self::View => WizardState::Viewing,
            Self::ValidateKeys => WizardState::ValidatingKeys,
            Self::Exit => WizardState::Done,
        }
    }
}
