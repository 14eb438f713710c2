pub fn banner(version: &str) -> String {
    format!("⟩ yue - ({version})")
}

pub const LOADED_COMMANDS: &str = "Loaded Commands:";

pub fn command_loaded(name: &str, millis: u128) -> String {
    format!("Loaded {name} ({millis}ms)")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn session_restored(user: &str) -> String {
    format!("Restored session for {user}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn new_version(latest: &str) -> String {
    format!("⟩ New version found! Update to {latest}")
}

pub fn http_listening(port: u16) -> String {
    format!("Keep-alive endpoint listening on port {port}")
}
