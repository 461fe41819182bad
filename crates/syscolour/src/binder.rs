//! Binding a colour scheme into a stylesheet template.
//!
//! Templates are plain stylesheet text containing `%name` placeholders, one
//! per entry in [`PLACEHOLDERS`]. Rendering replaces every placeholder with
//! the CSS form of the matching scheme colour:
//!
//! ```rust
//! use syscolour::{render_template, Colour, ColourScheme};
//!
//! let mut scheme = ColourScheme::default();
//! scheme.label_color = Some(Colour::rgba(0, 0, 0, 255));
//!
//! let css = render_template(".label { -fx-text-fill: %labelColor; }", &scheme).unwrap();
//! assert_eq!(css, ".label { -fx-text-fill: rgba(0, 0, 0, 1); }");
//! ```
//!
//! A placeholder that occurs in the template but has no colour in the scheme
//! fails the whole render; nothing partial is produced. Placeholders the
//! template does not use are not required.
//!
//! [`TemplateBinder::apply`] goes one step further: it writes the rendered
//! stylesheet to a temporary `.css` file and registers its `file://` URL with
//! a [`StylesheetHost`]. The file lives as long as the returned
//! [`StylesheetReference`].

use std::borrow::Cow;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use url::Url;

use crate::colour::Colour;
use crate::error::BindError;
use crate::resources::{Resources, STYLESHEET_TEMPLATE};
use crate::scheme::ColourScheme;

type Lookup = fn(&ColourScheme) -> Option<Colour>;

/// A template token and the scheme colour it stands for.
pub struct Placeholder {
    pub token: &'static str,
    lookup: Lookup,
}

impl Placeholder {
    pub fn resolve(&self, scheme: &ColourScheme) -> Option<Colour> {
        (self.lookup)(scheme)
    }
}

impl std::fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placeholder")
            .field("token", &self.token)
            .finish()
    }
}

/// Every placeholder a template may use, in substitution order.
pub static PLACEHOLDERS: &[Placeholder] = &[
    Placeholder {
        token: "%labelColor",
        lookup: |s| s.label_color,
    },
    Placeholder {
        token: "%secondaryLabelColor",
        lookup: |s| s.secondary_label_color,
    },
    Placeholder {
        token: "%tertiaryLabelColor",
        lookup: |s| s.tertiary_label_color,
    },
    Placeholder {
        token: "%quaternaryLabelColor",
        lookup: |s| s.quaternary_label_color,
    },
    Placeholder {
        token: "%textColor",
        lookup: |s| s.text_color,
    },
    Placeholder {
        token: "%separatorColor",
        lookup: |s| s.separator_color,
    },
    Placeholder {
        token: "%selectedContentBackgroundColor",
        lookup: |s| s.selected_content_background_color,
    },
    Placeholder {
        token: "%selectedMenuItemTextColor",
        lookup: |s| s.selected_menu_item_text_color,
    },
    // binds to the first of the alternating row colours
    Placeholder {
        token: "%alternatingContentBackgroundColor",
        lookup: ColourScheme::first_alternating_background,
    },
    Placeholder {
        token: "%controlAccentColor",
        lookup: |s| s.control_accent_color,
    },
    Placeholder {
        token: "%controlColor",
        lookup: |s| s.control_color,
    },
    Placeholder {
        token: "%controlBackgroundColor",
        lookup: |s| s.control_background_color,
    },
    Placeholder {
        token: "%controlTextColor",
        lookup: |s| s.control_text_color,
    },
    Placeholder {
        token: "%selectedControlColor",
        lookup: |s| s.selected_control_color,
    },
    Placeholder {
        token: "%windowBackgroundColor",
        lookup: |s| s.window_background_color,
    },
    Placeholder {
        token: "%windowFrameTextColor",
        lookup: |s| s.window_frame_text_color,
    },
    Placeholder {
        token: "%underPageBackgroundColor",
        lookup: |s| s.under_page_background_color,
    },
    Placeholder {
        token: "%knobColor",
        lookup: |s| s.knob_color,
    },
    Placeholder {
        token: "%selectedKnobColor",
        lookup: |s| s.selected_knob_color,
    },
    Placeholder {
        token: "%scrollBarColor",
        lookup: |s| s.scroll_bar_color,
    },
    Placeholder {
        token: "%systemRed",
        lookup: |s| s.system_red,
    },
    Placeholder {
        token: "%systemGreen",
        lookup: |s| s.system_green,
    },
    Placeholder {
        token: "%systemBlue",
        lookup: |s| s.system_blue,
    },
    Placeholder {
        token: "%systemOrange",
        lookup: |s| s.system_orange,
    },
    Placeholder {
        token: "%systemYellow",
        lookup: |s| s.system_yellow,
    },
    Placeholder {
        token: "%systemBrown",
        lookup: |s| s.system_brown,
    },
    Placeholder {
        token: "%systemPink",
        lookup: |s| s.system_pink,
    },
    Placeholder {
        token: "%systemPurple",
        lookup: |s| s.system_purple,
    },
    Placeholder {
        token: "%systemGray",
        lookup: |s| s.system_gray,
    },
];

/// Substitutes every placeholder in `template` with its colour from `scheme`.
///
/// # Errors
///
/// [`BindError::MissingColour`] for the first placeholder (in
/// [`PLACEHOLDERS`] order) that occurs in the template but resolves to no
/// colour. An empty alternating-colour list counts as missing.
pub fn render_template(template: &str, scheme: &ColourScheme) -> Result<String, BindError> {
    let mut rendered = template.to_string();
    for placeholder in PLACEHOLDERS {
        if !rendered.contains(placeholder.token) {
            continue;
        }
        let colour = placeholder
            .resolve(scheme)
            .ok_or(BindError::MissingColour {
                placeholder: placeholder.token,
            })?;
        rendered = rendered.replace(placeholder.token, &colour.to_css());
    }
    Ok(rendered)
}

/// Something that accepts additional stylesheets by URL, e.g. a scene.
pub trait StylesheetHost {
    fn add_stylesheet(&mut self, url: &str);
}

/// An ordered stylesheet list.
impl StylesheetHost for Vec<String> {
    fn add_stylesheet(&mut self, url: &str) {
        self.push(url.to_string());
    }
}

/// A rendered stylesheet on disk. Dropping it deletes the file.
#[derive(Debug)]
pub struct StylesheetReference {
    path: TempPath,
    url: Url,
}

impl StylesheetReference {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URL of the stylesheet.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Keeps the file past this reference's lifetime and returns its path.
    pub fn persist(self) -> Result<PathBuf, BindError> {
        self.path.keep().map_err(|e| BindError::Io(e.error))
    }
}

/// Renders a scheme through a stylesheet template.
#[derive(Debug, Clone)]
pub struct TemplateBinder {
    resources: Resources,
    template_name: String,
    template_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl Default for TemplateBinder {
    fn default() -> Self {
        Self::embedded()
    }
}

impl TemplateBinder {
    /// A binder using the `theme.css` entry of `resources`.
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            template_name: STYLESHEET_TEMPLATE.to_string(),
            template_file: None,
            output_dir: None,
        }
    }

    /// A binder using the template compiled into this crate.
    pub fn embedded() -> Self {
        Self::new(Resources::embedded())
    }

    /// Uses a different resource entry as the template.
    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    /// Reads the template from a file instead of the resource set.
    pub fn with_template_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_file = Some(path.into());
        self
    }

    /// Directory for rendered stylesheets. Defaults to the system temp dir.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// The template text, or `None` when it cannot be found.
    fn template(&self) -> Result<Option<Cow<'_, str>>, BindError> {
        match &self.template_file {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(text) => Ok(Some(Cow::Owned(text))),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "stylesheet template not found");
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            },
            None => {
                let text = self.resources.get(&self.template_name);
                if text.is_none() {
                    tracing::warn!(name = %self.template_name, "stylesheet template not found");
                }
                Ok(text.map(Cow::Borrowed))
            }
        }
    }

    /// Renders the template against `scheme`.
    ///
    /// `Ok(None)` when there is no template; nothing should be applied then.
    pub fn render(&self, scheme: &ColourScheme) -> Result<Option<String>, BindError> {
        match self.template()? {
            Some(template) => render_template(&template, scheme).map(Some),
            None => Ok(None),
        }
    }

    /// Renders `scheme` into a fresh, uniquely named `.css` file.
    pub fn write(&self, scheme: &ColourScheme) -> Result<Option<StylesheetReference>, BindError> {
        let Some(css) = self.render(scheme)? else {
            return Ok(None);
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix("syscolour-").suffix(".css");
        let mut file = match &self.output_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(css.as_bytes())?;
        file.flush()?;

        let path = file.into_temp_path();
        let absolute = std::fs::canonicalize(&path)?;
        let url =
            Url::from_file_path(&absolute).map_err(|()| BindError::NotAbsolute(absolute.clone()))?;

        tracing::debug!(path = %absolute.display(), bytes = css.len(), "wrote stylesheet");
        Ok(Some(StylesheetReference { path, url }))
    }

    /// Renders `scheme`, writes it out and registers it with `host`.
    ///
    /// Keep the returned reference alive while `host` uses the stylesheet.
    pub fn apply<H: StylesheetHost + ?Sized>(
        &self,
        scheme: &ColourScheme,
        host: &mut H,
    ) -> Result<Option<StylesheetReference>, BindError> {
        let reference = self.write(scheme)?;
        if let Some(reference) = &reference {
            host.add_stylesheet(reference.url().as_str());
        }
        Ok(reference)
    }
}
