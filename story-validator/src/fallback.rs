//! Placeholder story synthesis for when generation keeps failing.
//!
//! Output is a fixed skeleton per framework with the prompt and title
//! interpolated. Only quote characters are escaped (as HTML entities) and
//! newlines folded; the skeletons themselves are trusted as written.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target UI framework of a story file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    #[default]
    React,
    Vue,
    Angular,
    Svelte,
    WebComponents,
}

impl Framework {
    /// Case-insensitive lookup; anything unknown is React.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "vue" | "vue3" => Self::Vue,
            "angular" => Self::Angular,
            "svelte" => Self::Svelte,
            "web-components" | "webcomponents" | "lit" => Self::WebComponents,
            _ => Self::React,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Angular => "angular",
            Self::Svelte => "svelte",
            Self::WebComponents => "web-components",
        }
    }

    /// Storybook renderer package whose `Meta`/`StoryObj` types the story uses.
    pub fn storybook_package(self) -> &'static str {
        match self {
            Self::React => "@storybook/react",
            Self::Vue => "@storybook/vue3",
            Self::Angular => "@storybook/angular",
            Self::Svelte => "@storybook/svelte",
            Self::WebComponents => "@storybook/web-components",
        }
    }

    /// True when stories are written as JSX components.
    pub fn uses_jsx(self) -> bool {
        self == Self::React
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Render a loadable placeholder story for `framework` (a framework name).
pub fn synthesize_fallback(original_prompt: &str, title: &str, framework: &str) -> String {
    let fw = Framework::from_name(framework);
    let prompt = escape(original_prompt);
    let title = escape(title);
    let pkg = fw.storybook_package();

    match fw {
        Framework::React => format!(
            "import React from 'react';
import type {{ Meta, StoryObj }} from '{pkg}';

const FallbackComponent = () => (
  <div style={{{{ padding: '1rem', border: '1px dashed #999', borderRadius: 8 }}}}>
    <h3>{{'{title}'}}</h3>
    <p>{{'Generated story placeholder for: {prompt}'}}</p>
    <p>{{'The generated code could not be validated. Try refining the prompt.'}}</p>
  </div>
);

const meta: Meta<typeof FallbackComponent> = {{
  title: '{title}',
  component: FallbackComponent,
}};

export default meta;
type Story = StoryObj<typeof meta>;

export const Default: Story = {{}};
"
        ),
        Framework::Vue | Framework::Angular => format!(
            "import type {{ Meta, StoryObj }} from '{pkg}';

const meta: Meta = {{
  title: '{title}',
}};

export default meta;
type Story = StoryObj;

export const Default: Story = {{
  render: () => ({{
    template: '<div style=\"padding: 1rem; border: 1px dashed #999;\"><h3>{title}</h3><p>Generated story placeholder for: {prompt}</p></div>',
  }}),
}};
"
        ),
        Framework::Svelte | Framework::WebComponents => format!(
            "import type {{ Meta, StoryObj }} from '{pkg}';

const meta: Meta = {{
  title: '{title}',
}};

export default meta;
type Story = StoryObj;

export const Default: Story = {{
  render: () => '<div style=\"padding: 1rem; border: 1px dashed #999;\"><h3>{title}</h3><p>Generated story placeholder for: {prompt}</p></div>',
}};
"
        ),
    }
}

fn escape(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|l| !l.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
