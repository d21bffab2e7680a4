use std::{collections::HashMap, io::Write};

use crate::script::validate::{self, Validated};

/// Signature shared by every transformation validator.
pub type TransformFn = fn(&[&str]) -> Validated;

/// Script commands that act on the session instead of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Bind a new source image.
    Read,
    /// Clear the pipeline (watch mode only).
    Reset,
    /// Print the command table.
    Help,
    /// Print the current pipeline.
    Show,
}

#[derive(Clone, Copy, Debug)]
pub enum CommandAction {
    Transform(TransformFn),
    Directive(Directive),
}

/// One registry entry.
#[derive(Clone, Copy, Debug)]
pub struct CommandSpec {
    /// Primary name, used in the help table.
    pub name: &'static str,
    /// Additional names resolving to the same entry.
    pub aliases: &'static [&'static str],
    /// Number of argument fields after the command name.
    pub min_args: usize,
    /// Parameter documentation, also used in diagnostics.
    pub usage: &'static str,
    pub action: CommandAction,
}

impl CommandSpec {
    pub const fn transform(
        name: &'static str,
        aliases: &'static [&'static str],
        min_args: usize,
        usage: &'static str,
        validator: TransformFn,
    ) -> Self {
        Self {
            name,
            aliases,
            min_args,
            usage,
            action: CommandAction::Transform(validator),
        }
    }

    pub const fn directive(
        name: &'static str,
        aliases: &'static [&'static str],
        min_args: usize,
        usage: &'static str,
        directive: Directive,
    ) -> Self {
        Self {
            name,
            aliases,
            min_args,
            usage,
            action: CommandAction::Directive(directive),
        }
    }

    /// Primary name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

const STANDARD_COMMANDS: &[CommandSpec] = &[
    CommandSpec::transform("blur", &[], 1, "value > 0", validate::blur),
    CommandSpec::transform(
        "brightness",
        &[],
        1,
        "value (-100, 100)",
        validate::brightness,
    ),
    CommandSpec::transform(
        "colorbalance",
        &[],
        3,
        "red green blue (-100, 500)",
        validate::color_balance,
    ),
    CommandSpec::transform(
        "colorize",
        &[],
        3,
        "hue (0-360) saturation (0-100) percentage (0-100)",
        validate::colorize,
    ),
    CommandSpec::transform(
        "colorspace",
        &[],
        1,
        "linear|l (sRGB->linear) or sRGB|s (linear->sRGB)",
        validate::colorspace,
    ),
    CommandSpec::transform("contrast", &[], 1, "value (-100, 100)", validate::contrast),
    CommandSpec::transform(
        "crop",
        &[],
        4,
        "x1 y1 x2 y2 (rectangle at (x1,y1) and (x2,y2))",
        validate::crop,
    ),
    CommandSpec::transform("cropsize", &[], 2, "width height", validate::crop_to_size),
    CommandSpec::transform("edge", &[], 0, "edge filter", validate::edge),
    CommandSpec::transform("emboss", &[], 0, "emboss filter", validate::emboss),
    CommandSpec::transform("fliph", &[], 0, "flip horizontal", validate::flip_horizontal),
    CommandSpec::transform("flipv", &[], 0, "flip vertical", validate::flip_vertical),
    CommandSpec::transform(
        "gamma",
        &[],
        1,
        "value (< 1 darken, > 1 lighten)",
        validate::gamma,
    ),
    CommandSpec::transform("gray", &[], 0, "grayscale image", validate::grayscale),
    CommandSpec::transform("hue", &[], 1, "value (-180, 180)", validate::hue),
    CommandSpec::transform("invert", &["neg"], 0, "invert image", validate::invert),
    CommandSpec::transform(
        "max",
        &[],
        1,
        "local maximum size (odd positive integer)",
        validate::local_maximum,
    ),
    CommandSpec::transform(
        "mean",
        &[],
        1,
        "local mean size (odd positive integer)",
        validate::local_mean,
    ),
    CommandSpec::transform(
        "median",
        &[],
        1,
        "local median size (odd positive integer)",
        validate::local_median,
    ),
    CommandSpec::transform(
        "min",
        &[],
        1,
        "local minimum size (odd positive integer)",
        validate::local_minimum,
    ),
    CommandSpec::transform("opacity", &[], 1, "value (0-100)", validate::opacity),
    CommandSpec::transform("pixelate", &["pix"], 1, "pixels", validate::pixelate),
    CommandSpec::transform("resize", &[], 2, "width height", validate::resize),
    CommandSpec::transform("resizefill", &[], 2, "width height", validate::resize_to_fill),
    CommandSpec::transform("resizefit", &[], 2, "width height", validate::resize_to_fit),
    CommandSpec::transform(
        "rotate",
        &["rot"],
        1,
        "degrees counter-clockwise",
        validate::rotate,
    ),
    CommandSpec::transform(
        "saturation",
        &["sat"],
        1,
        "value (-100, 500)",
        validate::saturation,
    ),
    CommandSpec::transform("sepia", &[], 1, "value (0-100)", validate::sepia),
    CommandSpec::transform(
        "sigmoid",
        &[],
        2,
        "midpoint (0,1) factor (-10,10)",
        validate::sigmoid,
    ),
    CommandSpec::transform("sobel", &[], 0, "sobel filter", validate::sobel),
    CommandSpec::transform(
        "threshold",
        &[],
        1,
        "color threshold percentage (0-100)",
        validate::threshold,
    ),
    CommandSpec::transform(
        "transpose",
        &[],
        0,
        "flip horizontally and rotate 90° counter-clockwise",
        validate::transpose,
    ),
    CommandSpec::transform(
        "transverse",
        &[],
        0,
        "flip vertically and rotate 90° counter-clockwise",
        validate::transverse,
    ),
    CommandSpec::transform(
        "unsharp",
        &[],
        3,
        "sigma (> 0) amount (0.5, 1.5) threshold (0, 0.05)",
        validate::unsharp_mask,
    ),
    CommandSpec::directive(
        "read",
        &["r"],
        1,
        "imagefile (open source file)",
        Directive::Read,
    ),
    CommandSpec::directive(
        "reset",
        &[],
        0,
        "discard image edits (watch mode only)",
        Directive::Reset,
    ),
    CommandSpec::directive("help", &["?", "h"], 0, "show command set", Directive::Help),
    CommandSpec::directive("show", &[], 0, "list the current pipeline", Directive::Show),
];

/// Immutable command table with O(1) alias resolution.
///
/// Built once at startup and handed to the session; the command set is data,
/// so builds can add or drop commands through [`RegistryBuilder`].
#[derive(Clone, Debug)]
pub struct Registry {
    specs: Vec<CommandSpec>,
    by_name: HashMap<&'static str, usize>,
}

impl Registry {
    /// The full standard command set.
    pub fn standard() -> Self {
        Self::builder().extend(STANDARD_COMMANDS.iter().copied()).build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Exact, case-sensitive lookup over names and aliases.
    pub fn resolve(&self, name: &str) -> Option<&CommandSpec> {
        self.by_name.get(name).map(|&idx| &self.specs[idx])
    }

    /// Entries sorted by primary name.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Write the `Command / Parameters` table, sorted by name.
    pub fn write_help(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{:<15} {}", "Command", "Parameters")?;
        for spec in &self.specs {
            writeln!(w, "{:<15} {}", spec.name, spec.usage)?;
        }
        Ok(())
    }
}

/// Assembles a [`Registry`]; later entries replace earlier ones by name.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    specs: Vec<CommandSpec>,
}

impl RegistryBuilder {
    pub fn insert(mut self, spec: CommandSpec) -> Self {
        self.specs.retain(|s| s.name != spec.name);
        self.specs.push(spec);
        self
    }

    pub fn extend(self, specs: impl IntoIterator<Item = CommandSpec>) -> Self {
        specs.into_iter().fold(self, Self::insert)
    }

    /// Drop the entry whose primary name is `name`.
    pub fn remove(mut self, name: &str) -> Self {
        self.specs.retain(|s| s.name != name);
        self
    }

    pub fn build(mut self) -> Registry {
        self.specs.sort_by(|a, b| a.name.cmp(b.name));
        let mut by_name = HashMap::new();
        for (idx, spec) in self.specs.iter().enumerate() {
            for name in spec.names() {
                if let Some(prev) = by_name.insert(name, idx) {
                    tracing::warn!(
                        name,
                        previous = self.specs[prev].name,
                        current = spec.name,
                        "command name registered twice; keeping the later entry"
                    );
                }
            }
        }
        Registry {
            specs: self.specs,
            by_name,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/registry.rs"]
mod tests;
