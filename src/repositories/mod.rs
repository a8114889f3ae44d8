//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Qui usiamo sqlx::query / sqlx::query_as con .bind(...) e non le macro query! / query_as!:
   le macro vogliono un database raggiungibile (o i metadati offline) già in compilazione,
   mentre così il crate compila ovunque e i test HTTP girano senza MySQL.
   Il mapping riga -> struct lo fa #[derive(sqlx::FromRow)] sulle entity.
   Valori sempre passati come parametri (?), mai concatenati nella stringa SQL.

   Promemoria sui metodi:
   .execute(..)         -> INSERT/UPDATE/DELETE, ritorna MySqlQueryResult (last_insert_id, rows_affected)
   .fetch_optional(..)  -> zero o una riga
   .fetch_all(..)       -> Vec di righe
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod fiscal_module;
pub mod terminal;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{FiscalModuleStore, TerminalStore, UserStore};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use fiscal_module::FiscalModuleRepository;
pub use terminal::TerminalRepository;
pub use user::UserRepository;
