/// Settings shared by the balancing entry point, the embedding component and the generated
/// markup. Both the bootstrap script and the component must agree on attribute and global
/// names, so a page should use one `Config` throughout.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Ratio used by the embedding component when none is given
    pub default_ratio: f32,
    /// Element the embedding component renders as its wrapper
    pub default_tag: String,
    /// Attribute carrying a wrapper's stable identifier
    pub id_attribute: String,
    /// Attribute carrying a wrapper's balance ratio, re-read on every resize
    pub ratio_attribute: String,
    /// Global slot holding the balancing entry point
    pub relayout_global: String,
    /// Global slot holding the capability flag
    pub capability_global: String,
    /// Wrapper property holding the script-side resize observer
    pub observer_property: String,
    /// Start the search at the wrapper's overflow width rather than half the container width
    pub refine_lower_bound: bool,
    /// Warn about block elements wrapped inside the component
    pub lint_nesting: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_ratio: 0.75,
            default_tag: "span".to_string(),
            id_attribute: "data-br".to_string(),
            ratio_attribute: "data-brr".to_string(),
            relayout_global: "__relayoutText".to_string(),
            capability_global: "__wrap_n".to_string(),
            observer_property: "__wrap_o".to_string(),
            refine_lower_bound: true,
            lint_nesting: cfg!(debug_assertions),
        }
    }
}

impl Config {
    /// Create a configuration with all the default values
    pub fn new() -> Config {
        Config::default()
    }

    /// Set the ratio used when a component does not specify one, modifying `self`
    pub fn default_ratio(&mut self, ratio: f32) -> &mut Self {
        self.default_ratio = ratio;
        self
    }

    /// Set the tag rendered for wrappers, modifying `self`
    pub fn default_tag<S: ToString>(&mut self, tag: S) -> &mut Self {
        self.default_tag = tag.to_string();
        self
    }

    /// Set the identifier and ratio attribute names, modifying `self`
    pub fn attributes<S: ToString, T: ToString>(&mut self, id: S, ratio: T) -> &mut Self {
        self.id_attribute = id.to_string();
        self.ratio_attribute = ratio.to_string();
        self
    }

    /// Set the names of the global entry point, the capability flag and the wrapper property
    /// holding its resize observer, modifying `self`
    pub fn globals<S: ToString, T: ToString, U: ToString>(
        &mut self,
        relayout: S,
        capability: T,
        observer: U,
    ) -> &mut Self {
        self.relayout_global = relayout.to_string();
        self.capability_global = capability.to_string();
        self.observer_property = observer.to_string();
        self
    }

    /// Enable or disable the lower-bound refinement, modifying `self`
    pub fn refine_lower_bound(&mut self, refine: bool) -> &mut Self {
        self.refine_lower_bound = refine;
        self
    }

    /// Enable or disable the nesting lint, modifying `self`
    pub fn lint_nesting(&mut self, lint: bool) -> &mut Self {
        self.lint_nesting = lint;
        self
    }
}
