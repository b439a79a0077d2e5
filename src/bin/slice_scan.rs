// src/bin/slice_scan.rs
//
// Short xi-scan through a Gaussian beam with frozen plasma (no particle push): for each slice,
// iterate compute_fields a fixed number of times feeding the averaged fields back in, then
// advance. Logs per-slice field maxima and the last iteration's change.
//
// Run:
//   cargo run --release --bin slice_scan -- [config.json] [slices] [iterations]
//   RUST_LOG=qs_pic=debug cargo run --release --bin slice_scan
//
// Output:
//   out/slice_scan/config.json
//   out/slice_scan/on_axis.csv   (slice,xi,ez,phi,max_ex,max_by,max_bz)

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use qs_pic::logging::init_logging;
use qs_pic::{Array2D, ConstArrays, Currents, FieldComputer, FieldSolverConfig, Fields, Grid2D};

/// Beam density on one slice: Gaussian in r, cosine-shaped along xi, negative for an electron
/// driver.
fn beam_density(grid: &Grid2D, xi: f64, sigma_r: f64, length: f64, amp: f64) -> Array2D {
    let profile = if xi > -length {
        0.5 * (1.0 + (std::f64::consts::PI * (xi + 0.5 * length) / (0.5 * length)).cos())
    } else {
        0.0
    };
    let n = grid.n;
    Array2D::from_fn(n, n, |i, j| {
        // Keep the wall ring and its neighbours empty.
        if i < 2 || j < 2 || i + 2 >= n || j + 2 >= n {
            return 0.0;
        }
        let (x, y) = (grid.coord(i), grid.coord(j));
        let r2 = (x * x + y * y) / (sigma_r * sigma_r);
        amp * profile * (-0.5 * r2).exp()
    })
}

fn main() -> Result<()> {
    init_logging("info");

    let mut args = std::env::args().skip(1);
    let cfg = match args.next() {
        Some(path) => FieldSolverConfig::from_file(Path::new(&path))
            .with_context(|| format!("loading {path}"))?,
        None => FieldSolverConfig::default(),
    };
    let slices: usize = match args.next() {
        Some(v) => v.parse().with_context(|| format!("bad slice count '{v}'"))?,
        None => 40,
    };
    let iterations: usize = match args.next() {
        Some(v) => v.parse().with_context(|| format!("bad iteration count '{v}'"))?,
        None => 3,
    };
    let computer = FieldComputer::new(&cfg)?;

    let grid = cfg.grid();
    let n = grid.n;
    let c = n / 2;
    let consts = Arc::new(ConstArrays::new(&grid, cfg.trick));

    let out_dir = Path::new("out").join("slice_scan");
    create_dir_all(&out_dir)?;
    cfg.write_to_dir(&out_dir)?;
    let mut w = BufWriter::new(File::create(out_dir.join("on_axis.csv"))?);
    writeln!(w, "slice,xi,ez,phi,max_ex,max_by,max_bz")?;

    info!(
        n,
        h = cfg.grid_step_size,
        xi_step = cfg.xi_step_size,
        slices,
        iterations,
        "starting scan"
    );

    let sigma_r = 4.0 * cfg.grid_step_size;
    let length = 0.5 * slices as f64 * cfg.xi_step_size;

    let plasma = Currents::for_grid(&grid);
    let mut flds_prev = Fields::for_grid(&grid);
    let mut beam_prev = Array2D::square(n);

    for k in 0..slices {
        let xi = -(k as f64) * cfg.xi_step_size;
        let beam_full = beam_density(&grid, xi, sigma_r, length, -0.1);

        let mut fields_avg = flds_prev.clone();
        let mut new_flds = flds_prev.clone();
        let mut change = 0.0;
        for _ in 0..iterations {
            let (solved, averaged) = computer.compute_fields(
                &fields_avg,
                &flds_prev,
                &consts,
                &beam_full,
                &beam_prev,
                &plasma,
                &plasma,
            );
            change = solved.max_abs_diff(&new_flds);
            new_flds = solved;
            fields_avg = averaged;
        }

        info!(
            slice = k,
            xi,
            max_ex = new_flds.ex.max_abs(),
            max_by = new_flds.by.max_abs(),
            last_change = change,
            "slice done"
        );
        writeln!(
            w,
            "{},{:.6e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            k,
            xi,
            new_flds.ez.get(c, c),
            new_flds.phi.get(c, c),
            new_flds.ex.max_abs(),
            new_flds.by.max_abs(),
            new_flds.bz.max_abs()
        )?;

        flds_prev = new_flds;
        beam_prev = beam_full;
    }
    w.flush()?;

    println!("Done. Outputs in {}", out_dir.to_string_lossy());
    Ok(())
}
