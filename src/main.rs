#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use anyhow::{Context, Result};
    use clap::Parser;
    use pdmgen::dialect::Dialect;
    use pdmgen::generator::{Generator, GeneratorConfig};
    use pdmgen::model::Schema;
    use pdmgen::parser::parse_document;
    use std::fs;
    use std::path::PathBuf;
    use tracing_subscriber::EnvFilter;

    #[derive(Parser)]
    #[command(name = "pdmgen", version, about = "Render PowerDesigner PDM tables as DDL or Java entities")]
    struct Cli {
        /// PDM file to read
        input: PathBuf,

        /// Table code to render; lists the model when omitted
        #[arg(short, long)]
        table: Option<String>,

        /// Output kind: mysql, oracle or java (default: the model's database)
        #[arg(short = 'g', long)]
        target: Option<Dialect>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spaces before each member line
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Do not annotate entities with @Data
        #[arg(long)]
        no_lombok: bool,

        /// Do not make entities Serializable
        #[arg(long)]
        no_serializable: bool,

        /// Do not annotate the primary key field with @Id
        #[arg(long)]
        no_id: bool,

        /// Log parser and mapping details to stderr
        #[arg(short, long)]
        verbose: bool,
    }

    impl Cli {
        fn generator_config(&self) -> GeneratorConfig {
            GeneratorConfig {
                indent: self.indent,
                lombok: !self.no_lombok,
                serializable: !self.no_serializable,
                annotate_id: !self.no_id,
            }
        }
    }

    fn init_logging(verbose: bool) {
        let default_filter = if verbose { "pdmgen=debug" } else { "pdmgen=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub(crate) fn summary(schema: &Schema) -> String {
        let mut output = format!(
            "DB: {}\nTables: {}\nSequences: {}\n",
            schema.db,
            schema.tables.len(),
            schema.sequences.len()
        );

        if !schema.tables.is_empty() {
            output.push('\n');
            for table in &schema.tables {
                let line = format!("{:30} {}", table.code, table.label());
                output.push_str(line.trim_end());
                output.push('\n');
            }
        }

        if !schema.sequences.is_empty() {
            output.push('\n');
            for sequence in &schema.sequences {
                output.push_str(&format!("{}\n", sequence.code));
            }
        }

        output
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        init_logging(cli.verbose);

        let input = fs::read_to_string(&cli.input)
            .with_context(|| format!("Failed to read {}", cli.input.display()))?;
        let schema = parse_document(&input).with_context(|| format!("Failed to parse {}", cli.input.display()))?;

        let artifact = match &cli.table {
            Some(code) => {
                let table = schema
                    .find_table(code)
                    .with_context(|| format!("Table not found: {}", code))?;
                let target = cli.target.unwrap_or(schema.db);
                tracing::debug!(table = %table.code, source = %schema.db, target = %target, "generating");

                let mut text = Generator::new(cli.generator_config()).generate(table, schema.db, target);
                text.push('\n');
                text
            }
            None => summary(&schema),
        };

        match &cli.output {
            Some(path) => fs::write(path, &artifact)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => print!("{}", artifact),
        }

        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

// The library is the wasm surface; the binary only exists on native targets.
#[cfg(target_arch = "wasm32")]
fn main() {}
