// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::average::print_average;
use crate::cmd::cgpa::print_cgpa;
use crate::cmd::serve::serve;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Compute the CGPA of a record file (JSON or TOML).
    Cgpa {
        /// Path to the record file.
        file: String,
    },
    /// Compute a CGPA as the plain average of semester SGPAs.
    Average {
        /// SGPA of each semester, on a 0-10 scale.
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Start the calculator and marksheet extraction server.
    Serve {
        /// Optional path to a TOML config file.
        #[arg(long)]
        config: Option<String>,
        /// Address to bind to, overriding the config file.
        #[arg(long)]
        bind: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Cgpa { file } => print_cgpa(&PathBuf::from(file)),
        Command::Average { values } => print_average(&values),
        Command::Serve { config, bind } => serve(config, bind).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_average_with_negative_value() {
        let cli = Command::try_parse_from(["gradecalc", "average", "8", "-1"]).unwrap();
        match cli {
            Command::Average { values } => assert_eq!(values, vec!["8", "-1"]),
            _ => panic!("Expected Average command"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli =
            Command::try_parse_from(["gradecalc", "serve", "--bind", "127.0.0.1:9000"]).unwrap();
        match cli {
            Command::Serve { config, bind } => {
                assert!(config.is_none());
                assert_eq!(bind.as_deref(), Some("127.0.0.1:9000"));
            }
            _ => panic!("Expected Serve command"),
        }
    }
}
