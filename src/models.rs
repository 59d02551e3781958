use std::str::FromStr;

use clap::ValueEnum;

/// Summarization models offered on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Model {
    #[default]
    #[value(name = "mistral-large")]
    MistralLarge,
    #[value(name = "llama-3.1-70b")]
    Llama31,
    #[value(name = "claude-3.5-sonnet")]
    Claude35Sonnet,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::MistralLarge, Model::Llama31, Model::Claude35Sonnet];

    /// Key used on the command line and in the config file
    pub fn key(&self) -> &'static str {
        match self {
            Model::MistralLarge => "mistral-large",
            Model::Llama31 => "llama-3.1-70b",
            Model::Claude35Sonnet => "claude-3.5-sonnet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Model::MistralLarge => "Mistral Large (French)",
            Model::Llama31 => "Llama 3.1 70B",
            Model::Claude35Sonnet => "Claude 3.5 Sonnet (Premium)",
        }
    }

    /// Provider model identifier sent to the completion API
    pub fn api_id(&self) -> &'static str {
        match self {
            Model::MistralLarge => "mistralai/mistral-large-2411",
            Model::Llama31 => "meta-llama/llama-3.1-70b-instruct",
            Model::Claude35Sonnet => "anthropic/claude-3.5-sonnet",
        }
    }

    /// Approximate cost of one summary
    pub fn cost(&self) -> &'static str {
        match self {
            Model::MistralLarge => "~0.002€",
            Model::Llama31 => "~0.001€",
            Model::Claude35Sonnet => "~0.01€",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.cost())
    }
}

impl FromStr for Model {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let keys = Model::ALL.map(|m| m.key()).join(", ");
                eyre::eyre!("unknown model '{s}' (expected one of: {keys})")
            })
    }
}
