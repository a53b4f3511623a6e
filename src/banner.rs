const BANNER: &str = r"
    ____  ______   _____                      __
   / __ \/ ____/  / ___/___  ____ ___________/ /_
  / /_/ / /       \__ \/ _ \/ __ `/ ___/ ___/ __ \
 / ____/ /___    ___/ /  __/ /_/ / /  / /__/ / / /
/_/    \____/   /____/\___/\__,_/_/   \___/_/ /_/
            + Connect
";

/// Print the title shown at startup.
pub fn print_banner() {
    println!("{BANNER}");
}
