use celnav::{
    cli::{summary_table, CelnavContext},
    CelnavError::{ClapError, DryRun},
};
use clap::ErrorKind::{DisplayHelp, DisplayVersion};
use log::{info, trace};
use std::{env, ffi::OsString, fmt::Debug};

fn main_with_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    I: Debug,
{
    let celnav_ctx = match CelnavContext::from_args(args) {
        Ok(celnav_ctx) => celnav_ctx,
        Err(DryRun {}) => {
            info!("Dry run. No sight was reduced.");
            return 0;
        }
        Err(ClapError(inner)) => {
            // Swallow broken pipe errors
            trace!("clap error: {:?}", inner.kind());
            let _ = inner.print();
            match inner.kind() {
                DisplayHelp | DisplayVersion => return 0,
                _ => return 1,
            }
        }
        Err(e) => {
            eprintln!("error parsing args: {e}");
            return 1;
        }
    };

    match celnav_ctx.run() {
        Ok(report) => {
            print!("{report}");
            info!("summary:\n{}", summary_table(&report));
            0
        }
        Err(e) => {
            eprintln!("sight reduction error: {e}");
            1
        }
    }
}

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    trace!("start main");
    let retcode = main_with_args(env::args());
    trace!("end main");
    std::process::exit(retcode);
}
