//! services/api/src/bin/hash_token.rs
//!
//! Prints the Argon2 hash of an admin token, ready to paste into
//! `ADMIN_TOKEN_HASH`. The token is read from the first argument, or from the
//! first line of stdin when no argument is given.

use api_lib::web::auth::hash_token;
use std::io::BufRead;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = match std::env::args().nth(1) {
        Some(token) => token,
        None => {
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if token.trim().is_empty() {
        return Err("token must not be empty".into());
    }

    let hash = hash_token(&token).map_err(|e| e.to_string())?;
    println!("{}", hash);
    Ok(())
}
