//! Native stub: the SPA itself starts from `houses_web::main` under wasm.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    println!("House points is a browser app; run `trunk serve --open` from frontend/.");
    println!("Routes:");
    for entry in houses_web::routes::ROUTES {
        println!("  {:<14} {}", entry.path, entry.page.nav_label());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
