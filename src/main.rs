use loadcmp::error::AppResult;

fn main() -> AppResult<()> {
    loadcmp::run()
}
