// src/bin/point_charge.rs
//
// Unit charge at the centre of an n×n window: Phi is the discrete Dirichlet Green's function.
//
// Run:
//   cargo run --release --bin point_charge -- [n] [h]
//
// Output:
//   out/point_charge/phi.csv   (i,j,x,y,phi,ex,ey)

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use qs_pic::logging::init_logging;
use qs_pic::{Array2D, ConstArrays, Currents, FieldComputer, FieldSolverConfig, Fields};

fn main() -> Result<()> {
    init_logging("info");

    let mut args = std::env::args().skip(1);
    let n: usize = match args.next() {
        Some(v) => v.parse().with_context(|| format!("bad grid size '{v}'"))?,
        None => 21,
    };
    let h: f64 = match args.next() {
        Some(v) => v.parse().with_context(|| format!("bad grid step '{v}'"))?,
        None => 1.0,
    };

    let cfg = FieldSolverConfig {
        window_width_steps: n,
        grid_step_size: h,
        trick: 0.0,
        ..FieldSolverConfig::default()
    };
    let computer = FieldComputer::new(&cfg)?;
    let grid = cfg.grid();

    let c = n / 2;
    let mut full = Currents::for_grid(&grid);
    full.ro.set(c, c, 1.0);
    // Same charge on the previous slice, so the transverse solve sees it too.
    let prev = full.clone();
    let beam = Array2D::square(n);
    let zeros = Fields::for_grid(&grid);

    let consts = ConstArrays::new(&grid, cfg.trick);
    let (fields, _) = computer.compute_fields(&zeros, &zeros, &consts, &beam, &beam, &prev, &full);

    info!(
        n,
        h,
        phi_centre = fields.phi.get(c, c),
        phi_neighbour = fields.phi.get(c + 1, c),
        ex_neighbour = fields.ex.get(c + 1, c),
        "solved point charge"
    );

    let out_dir = Path::new("out").join("point_charge");
    create_dir_all(&out_dir)?;
    cfg.write_to_dir(&out_dir)?;
    let mut w = BufWriter::new(File::create(out_dir.join("phi.csv"))?);
    writeln!(w, "i,j,x,y,phi,ex,ey")?;
    for i in 0..n {
        for j in 0..n {
            writeln!(
                w,
                "{},{},{:.6e},{:.6e},{:.16e},{:.16e},{:.16e}",
                i,
                j,
                grid.coord(i),
                grid.coord(j),
                fields.phi.get(i, j),
                fields.ex.get(i, j),
                fields.ey.get(i, j)
            )?;
        }
    }
    w.flush()?;

    println!("Wrote out/point_charge/phi.csv");
    Ok(())
}
