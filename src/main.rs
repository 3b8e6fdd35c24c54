use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cartan::reps::{self, RepresentationTable};
use cartan::{BuildConfig, InvariantForms, OrbitType};

#[derive(Parser, Debug)]
#[command(name = "cartan", about = "Invariant differential forms on associated bundles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute and print the per-degree invariant-form bases.
    Basis {
        /// Largest wedge degree to compute.
        #[arg(long, default_value_t = 4)]
        max_degree: usize,
        /// Representation table to construct against.
        #[arg(long, default_value = "su3-so3-r3")]
        rep: String,
        /// Also print each basis element evaluated at the generic point.
        #[arg(long)]
        evaluate: bool,
    },
    /// Print the invariant radial function.
    Invariant {
        /// Representation table to construct against.
        #[arg(long, default_value = "su3-so3-r3")]
        rep: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Basis {
            max_degree,
            rep,
            evaluate,
        } => run_basis(&rep, max_degree, evaluate)?,
        Commands::Invariant { rep } => run_invariant(&rep)?,
    }

    Ok(())
}

fn lookup_table(name: &str) -> Result<RepresentationTable> {
    match name {
        "su3-so3-r3" => {
            reps::su3_so3_r3().context("failed to build the SU(3)/SO(3) table")
        }
        other => bail!("unknown representation table `{other}`"),
    }
}

fn run_basis(rep: &str, max_degree: usize, evaluate: bool) -> Result<()> {
    let table = lookup_table(rep)?;
    let frame = table.frame.clone();
    let forms = InvariantForms::construct(
        table.alphabet,
        table.info,
        BuildConfig::up_to_degree(max_degree),
    )
    .context("construction failed")?;

    for degree in 0..=max_degree {
        let basis = forms.p_forms(degree);
        if basis.is_empty() {
            println!("degree {degree} (dim 0)");
            continue;
        }
        let rendered: Vec<String> = basis
            .iter()
            .map(|c| c.display(forms.alphabet()).to_string())
            .collect();
        println!("degree {degree} (dim {}): {}", basis.len(), rendered.join(", "));
        if evaluate {
            for composite in basis {
                let value = forms
                    .eval(composite, OrbitType::Generic)
                    .context("evaluation at the generic point failed")?;
                println!(
                    "  {} = {}",
                    composite.display(forms.alphabet()),
                    value.display(&frame)
                );
            }
        }
    }

    Ok(())
}

fn run_invariant(rep: &str) -> Result<()> {
    let table = lookup_table(rep)?;
    let frame = table.frame.clone();
    let forms = InvariantForms::construct(table.alphabet, table.info, BuildConfig::up_to_degree(0))
        .context("construction failed")?;

    let function = forms
        .invariant_function()
        .context("no invariant function in this representation")?;
    let value = forms
        .eval(function, OrbitType::Generic)
        .context("evaluation at the generic point failed")?;
    println!(
        "{} = {}",
        function.display(forms.alphabet()),
        value.display(&frame)
    );

    Ok(())
}
