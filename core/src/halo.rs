use pic_field::Scalar;

use crate::config::HaloWidths;
use crate::dim::Dim;
use crate::error::TopologyError;
use crate::tile::Tile;
use crate::yee::YeeLattice;

/// A relative tile offset: each component in `{-1, 0, 1}`, padded with
/// trailing zeros for axes the tile's dimensionality does not use. The zero
/// vector is reserved for "self" and never produced by [`Dim::directions`].
pub type Direction = [i8; 3];

/// Dimension-generic copy (fields) and add (currents) exchange across tile
/// boundaries. Stateless; every call is handed the acting tile and a
/// neighbour-lookup closure supplied by the orchestrator, so two tiles are
/// only ever borrowed for the duration of one call.
#[derive(Debug, Default, Clone, Copy)]
pub struct HaloExchanger;

impl HaloExchanger {
    pub fn new() -> Self {
        Self
    }

    /// Copies ghost-band slabs from each live neighbour's interior-adjacent
    /// region into `tile`'s ghost band. Idempotent: calling this twice with
    /// no intervening kernel reproduces the same ghost band. A `None`
    /// neighbour (open boundary) is skipped without mutating `tile`.
    pub fn sync_fields<S: Scalar>(
        &self,
        halo: HaloWidths,
        tile: &mut Tile<S>,
        mut neighbor: impl FnMut(Direction) -> Option<&Tile<S>>,
    ) -> Result<(), TopologyError> {
        let dim = tile.dim();
        for dir in dim.directions() {
            let Some(nbr) = neighbor(dir) else {
                log::trace!("tile {:?}: no neighbour at {:?}, skipping field sync", tile.id(), dir);
                continue;
            };
            validate_shapes(dim, dir, tile.yee(), nbr.yee())?;
            copy_direction(dim, dir, halo.fields, tile.yee_mut(), nbr.yee());
        }
        Ok(())
    }

    /// Adds this tile's ghost-band currents into the interior-adjacent
    /// region of the side of each live neighbour that borders it, reading
    /// from the *neighbour's* ghost band contributed by the same call on
    /// its own side. Each call mutates only `tile`; the orchestrator must
    /// invoke this exactly once per tile per step, since repeated calls
    /// would double-count.
    pub fn exchange_currents<S: Scalar>(
        &self,
        halo: HaloWidths,
        tile: &mut Tile<S>,
        mut neighbor: impl FnMut(Direction) -> Option<&Tile<S>>,
    ) -> Result<(), TopologyError> {
        let dim = tile.dim();
        for dir in dim.directions() {
            let Some(nbr) = neighbor(dir) else {
                log::trace!("tile {:?}: no neighbour at {:?}, skipping current exchange", tile.id(), dir);
                continue;
            };
            validate_shapes(dim, dir, tile.yee(), nbr.yee())?;
            add_direction(dim, dir, halo.currents, tile.yee_mut(), nbr.yee());
        }
        Ok(())
    }
}

fn extent(yee: &YeeLattice<impl Scalar>, axis: usize) -> i64 {
    match axis {
        0 => yee.nx() as i64,
        1 => yee.ny() as i64,
        2 => yee.nz() as i64,
        _ => unreachable!("only 3 spatial axes"),
    }
}

fn validate_shapes(
    dim: Dim,
    dir: Direction,
    self_yee: &YeeLattice<impl Scalar>,
    nbr_yee: &YeeLattice<impl Scalar>,
) -> Result<(), TopologyError> {
    if self_yee.h() != nbr_yee.h() {
        return Err(TopologyError::GhostWidthMismatch {
            h: self_yee.h(),
            n_h: nbr_yee.h(),
        });
    }
    for axis in 0..dim.as_usize() {
        if dir[axis] == 0 && extent(self_yee, axis) != extent(nbr_yee, axis) {
            return Err(TopologyError::ExtentMismatch {
                nx: self_yee.nx(),
                ny: self_yee.ny(),
                nz: self_yee.nz(),
                n_nx: nbr_yee.nx(),
                n_ny: nbr_yee.ny(),
                n_nz: nbr_yee.nz(),
            });
        }
    }
    Ok(())
}

/// `h` is 1-based, `h in [1, halo]`: `self[-h] <- L[Nx_L - h]` on the low
/// side, `self[Nx+h-1] <- R[h-1]` on the high side.
fn copy_pair(sign: i8, h: usize, self_extent: i64, nbr_extent: i64) -> (i64, i64) {
    let h = h as i64;
    if sign < 0 {
        (-h, nbr_extent - h)
    } else {
        (self_extent + h - 1, h - 1)
    }
}

/// `h` is 0-based, `h in [0, halo)`: on the low side `self[h] += L_ghost[Nx_L
/// + h]`; on the high side `self[Nx-1-h] += R_ghost[-1-h]`. Both forms only
/// ever mutate `self`, reading the neighbour's ghost band — the neighbour
/// reconciles its own side of the same seam on its own turn.
fn add_pair(sign: i8, h: usize, self_extent: i64, nbr_extent: i64) -> (i64, i64) {
    let h = h as i64;
    if sign < 0 {
        (h, nbr_extent + h)
    } else {
        (self_extent - 1 - h, -1 - h)
    }
}

fn copy_direction<S: Scalar>(dim: Dim, dir: Direction, halo: usize, dst: &mut YeeLattice<S>, src: &YeeLattice<S>) {
    let axes: Vec<usize> = (0..dim.as_usize()).filter(|&a| dir[a] != 0).collect();
    match axes.len() {
        1 => {
            let axis = axes[0];
            let sign = dir[axis];
            let (se, ne) = (extent(dst, axis), extent(src, axis));
            for h in 1..=halo {
                let (d, s) = copy_pair(sign, h, se, ne);
                match axis {
                    0 => {
                        dst.ex.copy_vert(&src.ex, d, s);
                        dst.ey.copy_vert(&src.ey, d, s);
                        dst.ez.copy_vert(&src.ez, d, s);
                        dst.bx.copy_vert(&src.bx, d, s);
                        dst.by.copy_vert(&src.by, d, s);
                        dst.bz.copy_vert(&src.bz, d, s);
                    }
                    1 => {
                        dst.ex.copy_horz(&src.ex, d, s);
                        dst.ey.copy_horz(&src.ey, d, s);
                        dst.ez.copy_horz(&src.ez, d, s);
                        dst.bx.copy_horz(&src.bx, d, s);
                        dst.by.copy_horz(&src.by, d, s);
                        dst.bz.copy_horz(&src.bz, d, s);
                    }
                    _ => {
                        dst.ex.copy_face(&src.ex, d, s);
                        dst.ey.copy_face(&src.ey, d, s);
                        dst.ez.copy_face(&src.ez, d, s);
                        dst.bx.copy_face(&src.bx, d, s);
                        dst.by.copy_face(&src.by, d, s);
                        dst.bz.copy_face(&src.bz, d, s);
                    }
                }
            }
        }
        2 => {
            let free_axis = (0..3).find(|a| !axes.contains(a)).unwrap();
            let (a0, a1) = (axes[0], axes[1]);
            let (e0_d, e0_s) = (extent(dst, a0), extent(src, a0));
            let (e1_d, e1_s) = (extent(dst, a1), extent(src, a1));
            for h in 1..=halo {
                let (d0, s0) = copy_pair(dir[a0], h, e0_d, e0_s);
                for g in 1..=halo {
                    let (d1, s1) = copy_pair(dir[a1], g, e1_d, e1_s);
                    copy_pencil(free_axis, dst, src, d0, d1, s0, s1);
                }
            }
        }
        3 => {
            let (e0_d, e0_s) = (extent(dst, 0), extent(src, 0));
            let (e1_d, e1_s) = (extent(dst, 1), extent(src, 1));
            let (e2_d, e2_s) = (extent(dst, 2), extent(src, 2));
            for h in 1..=halo {
                let (di, si) = copy_pair(dir[0], h, e0_d, e0_s);
                for g in 1..=halo {
                    let (dj, sj) = copy_pair(dir[1], g, e1_d, e1_s);
                    for l in 1..=halo {
                        let (dk, sk) = copy_pair(dir[2], l, e2_d, e2_s);
                        copy_point_all(dst, src, di, dj, dk, si, sj, sk);
                    }
                }
            }
        }
        _ => unreachable!("Dim::directions never yields the zero vector"),
    }
}

fn add_direction<S: Scalar>(dim: Dim, dir: Direction, halo: usize, dst: &mut YeeLattice<S>, src: &YeeLattice<S>) {
    let axes: Vec<usize> = (0..dim.as_usize()).filter(|&a| dir[a] != 0).collect();
    match axes.len() {
        1 => {
            let axis = axes[0];
            let sign = dir[axis];
            let (se, ne) = (extent(dst, axis), extent(src, axis));
            for h in 0..halo {
                let (d, s) = add_pair(sign, h, se, ne);
                match axis {
                    0 => {
                        dst.jx.add_vert(&src.jx, d, s);
                        dst.jy.add_vert(&src.jy, d, s);
                        dst.jz.add_vert(&src.jz, d, s);
                    }
                    1 => {
                        dst.jx.add_horz(&src.jx, d, s);
                        dst.jy.add_horz(&src.jy, d, s);
                        dst.jz.add_horz(&src.jz, d, s);
                    }
                    _ => {
                        dst.jx.add_face(&src.jx, d, s);
                        dst.jy.add_face(&src.jy, d, s);
                        dst.jz.add_face(&src.jz, d, s);
                    }
                }
            }
        }
        2 => {
            let free_axis = (0..3).find(|a| !axes.contains(a)).unwrap();
            let (a0, a1) = (axes[0], axes[1]);
            let (e0_d, e0_s) = (extent(dst, a0), extent(src, a0));
            let (e1_d, e1_s) = (extent(dst, a1), extent(src, a1));
            for h in 0..halo {
                let (d0, s0) = add_pair(dir[a0], h, e0_d, e0_s);
                for g in 0..halo {
                    let (d1, s1) = add_pair(dir[a1], g, e1_d, e1_s);
                    add_pencil(free_axis, dst, src, d0, d1, s0, s1);
                }
            }
        }
        3 => {
            let (e0_d, e0_s) = (extent(dst, 0), extent(src, 0));
            let (e1_d, e1_s) = (extent(dst, 1), extent(src, 1));
            let (e2_d, e2_s) = (extent(dst, 2), extent(src, 2));
            for h in 0..halo {
                let (di, si) = add_pair(dir[0], h, e0_d, e0_s);
                for g in 0..halo {
                    let (dj, sj) = add_pair(dir[1], g, e1_d, e1_s);
                    for l in 0..halo {
                        let (dk, sk) = add_pair(dir[2], l, e2_d, e2_s);
                        add_point_all(dst, src, di, dj, dk, si, sj, sk);
                    }
                }
            }
        }
        _ => unreachable!("Dim::directions never yields the zero vector"),
    }
}

fn copy_pencil<S: Scalar>(
    free_axis: usize,
    dst: &mut YeeLattice<S>,
    src: &YeeLattice<S>,
    d0: i64,
    d1: i64,
    s0: i64,
    s1: i64,
) {
    match free_axis {
        0 => {
            dst.ex.copy_xdir_pencil(&src.ex, d0, d1, s0, s1);
            dst.ey.copy_xdir_pencil(&src.ey, d0, d1, s0, s1);
            dst.ez.copy_xdir_pencil(&src.ez, d0, d1, s0, s1);
            dst.bx.copy_xdir_pencil(&src.bx, d0, d1, s0, s1);
            dst.by.copy_xdir_pencil(&src.by, d0, d1, s0, s1);
            dst.bz.copy_xdir_pencil(&src.bz, d0, d1, s0, s1);
        }
        1 => {
            dst.ex.copy_ydir_pencil(&src.ex, d0, d1, s0, s1);
            dst.ey.copy_ydir_pencil(&src.ey, d0, d1, s0, s1);
            dst.ez.copy_ydir_pencil(&src.ez, d0, d1, s0, s1);
            dst.bx.copy_ydir_pencil(&src.bx, d0, d1, s0, s1);
            dst.by.copy_ydir_pencil(&src.by, d0, d1, s0, s1);
            dst.bz.copy_ydir_pencil(&src.bz, d0, d1, s0, s1);
        }
        _ => {
            dst.ex.copy_zdir_pencil(&src.ex, d0, d1, s0, s1);
            dst.ey.copy_zdir_pencil(&src.ey, d0, d1, s0, s1);
            dst.ez.copy_zdir_pencil(&src.ez, d0, d1, s0, s1);
            dst.bx.copy_zdir_pencil(&src.bx, d0, d1, s0, s1);
            dst.by.copy_zdir_pencil(&src.by, d0, d1, s0, s1);
            dst.bz.copy_zdir_pencil(&src.bz, d0, d1, s0, s1);
        }
    }
}

fn add_pencil<S: Scalar>(
    free_axis: usize,
    dst: &mut YeeLattice<S>,
    src: &YeeLattice<S>,
    d0: i64,
    d1: i64,
    s0: i64,
    s1: i64,
) {
    match free_axis {
        0 => {
            dst.jx.add_xdir_pencil(&src.jx, d0, d1, s0, s1);
            dst.jy.add_xdir_pencil(&src.jy, d0, d1, s0, s1);
            dst.jz.add_xdir_pencil(&src.jz, d0, d1, s0, s1);
        }
        1 => {
            dst.jx.add_ydir_pencil(&src.jx, d0, d1, s0, s1);
            dst.jy.add_ydir_pencil(&src.jy, d0, d1, s0, s1);
            dst.jz.add_ydir_pencil(&src.jz, d0, d1, s0, s1);
        }
        _ => {
            dst.jx.add_zdir_pencil(&src.jx, d0, d1, s0, s1);
            dst.jy.add_zdir_pencil(&src.jy, d0, d1, s0, s1);
            dst.jz.add_zdir_pencil(&src.jz, d0, d1, s0, s1);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn copy_point_all<S: Scalar>(
    dst: &mut YeeLattice<S>,
    src: &YeeLattice<S>,
    di: i64,
    dj: i64,
    dk: i64,
    si: i64,
    sj: i64,
    sk: i64,
) {
    dst.ex.copy_point(&src.ex, di, dj, dk, si, sj, sk);
    dst.ey.copy_point(&src.ey, di, dj, dk, si, sj, sk);
    dst.ez.copy_point(&src.ez, di, dj, dk, si, sj, sk);
    dst.bx.copy_point(&src.bx, di, dj, dk, si, sj, sk);
    dst.by.copy_point(&src.by, di, dj, dk, si, sj, sk);
    dst.bz.copy_point(&src.bz, di, dj, dk, si, sj, sk);
}

#[allow(clippy::too_many_arguments)]
fn add_point_all<S: Scalar>(
    dst: &mut YeeLattice<S>,
    src: &YeeLattice<S>,
    di: i64,
    dj: i64,
    dk: i64,
    si: i64,
    sj: i64,
    sk: i64,
) {
    dst.jx.add_point(&src.jx, di, dj, dk, si, sj, sk);
    dst.jy.add_point(&src.jy, di, dj, dk, si, sj, sk);
    dst.jz.add_point(&src.jz, di, dj, dk, si, sj, sk);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileConfig;
    use crate::tile::TileId;

    fn tile_2d(nx: usize, ny: usize, h: usize, cfl: f64) -> Tile<f64> {
        let cfg = TileConfig::new(Dim::D2, nx, ny, 1, h, cfl).unwrap();
        Tile::new(TileId(0), cfg, 1).unwrap()
    }

    #[test]
    fn field_copy_is_idempotent() {
        let mut a = tile_2d(8, 8, 3, 0.5);
        let mut b = tile_2d(8, 8, 3, 0.5);
        b.yee_mut().ex.set(0, 3, 0, 4.5);

        let ex = HaloExchanger::new();
        let halo = HaloWidths { fields: 1, currents: 3 };

        ex.sync_fields(halo, &mut a, |dir| if dir == [-1, 0, 0] { Some(&b) } else { None })
            .unwrap();
        let once = a.yee().ex.at(-1, 3, 0);
        ex.sync_fields(halo, &mut a, |dir| if dir == [-1, 0, 0] { Some(&b) } else { None })
            .unwrap();
        assert_eq!(a.yee().ex.at(-1, 3, 0), once);
        assert_eq!(once, 4.5);
    }

    #[test]
    fn current_reconciliation_s3() {
        // A (left, Nx=16) and B (right, Nx=16), H=3, halo_currents=3.
        let mut a = tile_2d(16, 16, 3, 0.5);
        let mut b = tile_2d(16, 16, 3, 0.5);

        for &i in &[15i64, 16, 17] {
            a.yee_mut().jx.set(i, 0, 0, 1.0);
        }
        for &i in &[-2i64, -1, 0] {
            b.yee_mut().jx.set(i, 0, 0, 1.0);
        }

        let ex = HaloExchanger::new();
        let halo = HaloWidths { fields: 1, currents: 3 };

        // a's right neighbour is b; a has no left neighbour.
        ex.exchange_currents(halo, &mut a, |dir| if dir == [1, 0, 0] { Some(&b) } else { None })
            .unwrap();
        // b's left neighbour is a; b has no right neighbour.
        ex.exchange_currents(halo, &mut b, |dir| if dir == [-1, 0, 0] { Some(&a) } else { None })
            .unwrap();

        assert_eq!(a.yee().jx.at(15, 0, 0), 2.0);
        assert_eq!(b.yee().jx.at(0, 0, 0), 2.0);
        // single-sided leaks land on the real owner exactly once, no
        // double-counting.
        assert_eq!(a.yee().jx.at(14, 0, 0), 1.0);
        assert_eq!(b.yee().jx.at(1, 0, 0), 1.0);
        assert_eq!(a.yee().jx.at(13, 0, 0), 0.0);
        assert_eq!(b.yee().jx.at(2, 0, 0), 0.0);
    }

    #[test]
    fn null_neighbor_is_skipped_without_mutation() {
        let mut a = tile_2d(8, 8, 3, 0.5);
        let before = a.yee().ex.clone();
        let ex = HaloExchanger::new();
        ex.sync_fields(HaloWidths { fields: 1, currents: 3 }, &mut a, |_| None)
            .unwrap();
        assert_eq!(a.yee().ex, before);
    }
}
