use pic_util::smoothstep;

use crate::config::ConductorConfig;
use crate::tile::Tile;
use pic_field::Scalar;

/// A rotating, obliquely magnetised sphere that overwrites fields inside its
/// radius, used as a worked example of a driven domain boundary. `insert_em`
/// initialises the region outright; `update_b`/`update_e` blend the FDTD
/// state toward the analytic solution across a transition shell of
/// thickness `delta`, leaving cells outside the sphere untouched.
pub struct ConductorInjector {
    config: ConductorConfig,
}

impl ConductorInjector {
    pub fn new(config: ConductorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ConductorConfig {
        self.config
    }

    /// The magnetic moment vector `m = B0 R^3 (sin(chi) cos(phase), sin(chi)
    /// sin(phase), cos(chi))`, tilted by `chi` from the rotation axis (z)
    /// and precessing with `phase`.
    fn moment(&self) -> (f64, f64, f64) {
        let c = &self.config;
        let m_mag = c.b0 * c.radius.powi(3);
        (
            m_mag * c.chi.sin() * c.phase.cos(),
            m_mag * c.chi.sin() * c.phase.sin(),
            m_mag * c.chi.cos(),
        )
    }

    /// Dipole field `B = (3(m.rhat)rhat - m) / r^3` at offset `(x, y, z)`
    /// from the sphere centre. Inside `r < delta` the field is taken as
    /// `B0` along `m_hat`, avoiding the `1/r^3` singularity at the origin.
    fn dipole(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let (mx, my, mz) = self.moment();
        let r = (x * x + y * y + z * z).sqrt();
        if r < self.config.delta {
            let m_norm = (mx * mx + my * my + mz * mz).sqrt();
            if m_norm == 0.0 {
                return (0.0, 0.0, 0.0);
            }
            return (self.config.b0 * mx / m_norm, self.config.b0 * my / m_norm, self.config.b0 * mz / m_norm);
        }
        let (rx, ry, rz) = (x / r, y / r, z / r);
        let m_dot_r = mx * rx + my * ry + mz * rz;
        let r3 = r * r * r;
        (
            (3.0 * m_dot_r * rx - mx) / r3,
            (3.0 * m_dot_r * ry - my) / r3,
            (3.0 * m_dot_r * rz - mz) / r3,
        )
    }

    /// Rotation-induced electric field `E = -(Omega x r) x B`, with the
    /// rotation axis fixed at z and `Omega = angular_velocity * z_hat`.
    fn rotational_e(&self, x: f64, y: f64, z: f64, b: (f64, f64, f64)) -> (f64, f64, f64) {
        let omega = self.config.angular_velocity();
        // Omega x r = omega * (-y, x, 0)
        let (ox, oy, oz) = (-omega * y, omega * x, 0.0);
        let (bx, by, bz) = b;
        // (Omega x r) x B
        let cx = oy * bz - oz * by;
        let cy = oz * bx - ox * bz;
        let cz = ox * by - oy * bx;
        (-cx, -cy, -cz)
    }

    fn weight(&self, r: f64) -> f64 {
        smoothstep((self.config.radius - r) / self.config.delta)
    }

    /// Initialises E and B inside the sphere (`r <= radius`) to the exact
    /// dipole-plus-rotational-induction solution for the current phase.
    pub fn insert_em<S: Scalar>(&self, tile: &mut Tile<S>) {
        let (cx, cy, cz) = self.config.centre;
        let (nx, ny, nz) = (tile.yee().nx() as i64, tile.yee().ny() as i64, tile.yee().nz() as i64);
        let mesh = tile.yee_mut();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let (x, y, z) = cell_offset(i, j, k, cx, cy, cz);
                    let r = (x * x + y * y + z * z).sqrt();
                    if r > self.config.radius {
                        continue;
                    }
                    let b = self.dipole(x, y, z);
                    let e = self.rotational_e(x, y, z, b);
                    set(&mut mesh.bx, i, j, k, b.0);
                    set(&mut mesh.by, i, j, k, b.1);
                    set(&mut mesh.bz, i, j, k, b.2);
                    set(&mut mesh.ex, i, j, k, e.0);
                    set(&mut mesh.ey, i, j, k, e.1);
                    set(&mut mesh.ez, i, j, k, e.2);
                }
            }
        }
    }

    /// Blends the FDTD `B` toward the analytic dipole inside the sphere,
    /// with a smoothstep weight that reaches 1 at the centre and fades to 0
    /// across the `delta`-thick transition shell at `r = radius`.
    pub fn update_b<S: Scalar>(&self, tile: &mut Tile<S>) {
        self.visit_b(tile);
    }

    /// Blends the FDTD `E` toward the rotation-induced field the same way.
    pub fn update_e<S: Scalar>(&self, tile: &mut Tile<S>) {
        self.visit_e(tile);
    }

    fn visit_b<S: Scalar>(&self, tile: &mut Tile<S>) {
        let (cx, cy, cz) = self.config.centre;
        let (nx, ny, nz) = (tile.yee().nx() as i64, tile.yee().ny() as i64, tile.yee().nz() as i64);
        let mesh = tile.yee_mut();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let (x, y, z) = cell_offset(i, j, k, cx, cy, cz);
                    let r = (x * x + y * y + z * z).sqrt();
                    if r > self.config.radius {
                        continue;
                    }
                    let w = self.weight(r);
                    let (bx, by, bz) = self.dipole(x, y, z);
                    blend(&mut mesh.bx, i, j, k, bx, w);
                    blend(&mut mesh.by, i, j, k, by, w);
                    blend(&mut mesh.bz, i, j, k, bz, w);
                }
            }
        }
    }

    fn visit_e<S: Scalar>(&self, tile: &mut Tile<S>) {
        let (cx, cy, cz) = self.config.centre;
        let (nx, ny, nz) = (tile.yee().nx() as i64, tile.yee().ny() as i64, tile.yee().nz() as i64);
        let mesh = tile.yee_mut();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let (x, y, z) = cell_offset(i, j, k, cx, cy, cz);
                    let r = (x * x + y * y + z * z).sqrt();
                    if r > self.config.radius {
                        continue;
                    }
                    let w = self.weight(r);
                    let b = self.dipole(x, y, z);
                    let (ex, ey, ez) = self.rotational_e(x, y, z, b);
                    blend(&mut mesh.ex, i, j, k, ex, w);
                    blend(&mut mesh.ey, i, j, k, ey, w);
                    blend(&mut mesh.ez, i, j, k, ez, w);
                }
            }
        }
    }

}

fn cell_offset(i: i64, j: i64, k: i64, cx: f64, cy: f64, cz: f64) -> (f64, f64, f64) {
    (i as f64 - cx, j as f64 - cy, k as f64 - cz)
}

fn set<S: Scalar>(buf: &mut pic_field::NdArray3<S>, i: i64, j: i64, k: i64, v: f64) {
    buf.set(i, j, k, S::from(v).expect("analytic value must be representable in S"));
}

fn blend<S: Scalar>(buf: &mut pic_field::NdArray3<S>, i: i64, j: i64, k: i64, analytic: f64, w: f64) {
    let analytic = S::from(analytic).expect("analytic value must be representable in S");
    let w = S::from(w).expect("weight must be representable in S");
    let old = buf.at(i, j, k);
    let one = S::one();
    buf.set(i, j, k, old * (one - w) + analytic * w);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileConfig;
    use crate::dim::Dim;
    use crate::tile::TileId;

    fn cfg() -> ConductorConfig {
        ConductorConfig {
            radius: 10.0,
            period: 1.0,
            b0: 1.0,
            chi: 0.0,
            phase: 0.0,
            centre: (32.0, 32.0, 32.0),
            delta: 1.0,
        }
    }

    #[test]
    fn axial_dipole_matches_closed_form_s4() {
        let tile_cfg = TileConfig::new(Dim::D3, 64, 64, 64, 3, 0.2).unwrap();
        let mut tile = Tile::<f64>::new(TileId(0), tile_cfg, 1).unwrap();
        let injector = ConductorInjector::new(cfg());

        injector.insert_em(&mut tile);

        let bz = tile.yee().bz.at(32, 32, 32 + 11);
        let expected = 1.0 * (10.0f64 / 11.0).powi(3) * 2.0;
        assert!((bz - expected).abs() / expected < 0.01);

        assert!(tile.yee().bx.at(32, 32, 32 + 11).abs() < 1e-9);
        assert!(tile.yee().by.at(32, 32, 32 + 11).abs() < 1e-9);
    }

    #[test]
    fn outside_sphere_is_untouched() {
        let tile_cfg = TileConfig::new(Dim::D3, 64, 64, 64, 3, 0.2).unwrap();
        let mut tile = Tile::<f64>::new(TileId(0), tile_cfg, 1).unwrap();
        tile.yee_mut().bz.set(0, 0, 0, 7.0);
        let injector = ConductorInjector::new(cfg());
        injector.update_b(&mut tile);
        assert_eq!(tile.yee().bz.at(0, 0, 0), 7.0);
    }
}
