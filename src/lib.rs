//! # Classwatch
//!
//! Command-line client for the school dropout-risk dashboard.
//!
//! The authorization engine lives in the workspace crates; this crate wires it
//! to the dashboard's routes and menu and exposes it on the command line.
//!
//! ```text
//! crates/
//! ├── classwatch-core/     # Permission catalog: permissions, roles, role map
//! ├── classwatch-config/   # Environment configuration
//! ├── classwatch-models/   # Users, credentials, route requirements, menus
//! └── classwatch-auth/     # Session store, guard, navigation filter, HTTP provider
//! src/
//! ├── cli/                 # clap subcommands
//! ├── router.rs            # Dashboard route table
//! ├── menu.rs              # Default menu, JSON menu loading
//! ├── state.rs             # Session store wiring
//! └── logging.rs           # Console logging
//! ```
//!
//! ## Roles
//!
//! | Role | Scope |
//! |------|-------|
//! | Admin | Every permission, plus the admin-only `/users` and `/admin` sections |
//! | Teacher | Classes, attendance, grades, disciplinary reporting |
//! | Counselor | Disciplinary cases, dropout risk and interventions, parents, reports |
//! | Student | Own classes, subjects, attendance and grades |
//! | Parent | Their children's records, attendance and grades |
//!
//! ## Configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CLASSWATCH_API_URL` | `http://localhost:8000/api/v1` |
//! | `CLASSWATCH_API_TIMEOUT_SECS` | `15` |
//! | `CLASSWATCH_STATE_DIR` | `$HOME/.classwatch` |
//! | `CLASSWATCH_STATE_FILE` | `session.json` |
//! | `LOG_LEVEL` | `info` |

pub mod cli;
pub mod logging;
pub mod menu;
pub mod router;
pub mod state;
