use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use feature_tally::{FrequencyStore, STDIN};

use crate::IoArgs;

/// Where a subcommand reads from and where its report goes.
pub struct IoPipe {
    source: String,
    dest: PathBuf,
    histogram: bool,
}

impl IoPipe {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Write the summary line, followed by the per-key counts if those were
    /// asked for.
    pub fn report(
        &self,
        summary: impl std::fmt::Display,
        store: &FrequencyStore,
    ) -> Result<()> {
        let mut out = format!("{summary}\n");
        if self.histogram {
            out.push_str(&store.to_string());
        }
        self.write_text(&out)
    }

    pub fn write_text(&self, output: impl AsRef<str>) -> Result<()> {
        if self.dest.to_str() == Some(STDIN) {
            print!("{}", output.as_ref());
        } else if self.dest.is_dir() {
            bail!("Cannot write text to a directory");
        } else {
            std::fs::write(&self.dest, output.as_ref())
                .with_context(|| format!("failed to write {:?}", self.dest))?;
        }
        Ok(())
    }
}

impl TryFrom<IoArgs> for IoPipe {
    type Error = anyhow::Error;

    fn try_from(value: IoArgs) -> Result<Self> {
        let source = value.input.to_string_lossy().into_owned();

        if source != STDIN && !value.input.is_file() {
            bail!("Input {:?} is not a file", value.input);
        }

        let dest = match value.output {
            Some(x) if x == value.input && source != STDIN => {
                bail!("Refusing to overwrite input with report");
            }
            Some(x) => x,
            None => PathBuf::from(STDIN),
        };

        Ok(IoPipe {
            source,
            dest,
            histogram: value.histogram,
        })
    }
}
