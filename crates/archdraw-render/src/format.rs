use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    /// The DOT source itself; no layout engine is involved.
    Dot,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [Self::Png, Self::Jpg, Self::Svg, Self::Pdf, Self::Dot];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }

    /// The `-T` argument Graphviz expects for this format.
    pub fn graphviz_flag(self) -> &'static str {
        match self {
            Self::Png => "-Tpng",
            Self::Jpg => "-Tjpg",
            Self::Svg => "-Tsvg",
            Self::Pdf => "-Tpdf",
            Self::Dot => "-Tcanon",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(()),
        }
    }
}
