use glam::{Quat, Vec3};

use crate::MaterializeError;
use crate::common::coordinate_systems::{Convention, SourceSpace};

#[test]
fn z_back_swaps_and_flips_points() -> Result<(), anyhow::Error> {
    let space = SourceSpace::new(Convention::ZBack, 1.0)?;
    assert_eq!(space.point(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 3.0, -2.0));
    Ok(())
}

#[test]
fn identity_only_divides_by_scale() -> Result<(), anyhow::Error> {
    let space = SourceSpace::new(Convention::Identity, 2.0)?;
    assert_eq!(space.point(Vec3::new(2.0, 4.0, 6.0)), Vec3::new(1.0, 2.0, 3.0));
    Ok(())
}

#[test]
fn z_back_applies_scale_too() -> Result<(), anyhow::Error> {
    let space = SourceSpace::new(Convention::ZBack, 2.0)?;
    assert_eq!(space.point(Vec3::new(2.0, 4.0, 6.0)), Vec3::new(1.0, 3.0, -2.0));
    Ok(())
}

#[test]
fn quaternion_w_is_untouched() -> Result<(), anyhow::Error> {
    let space = SourceSpace::new(Convention::ZBack, 4.0)?;
    let q = space.quaternion(Quat::from_xyzw(0.1, 0.2, 0.3, 0.9));
    assert_eq!(q, Quat::from_xyzw(0.1, 0.3, -0.2, 0.9));
    Ok(())
}

#[test]
fn eulers_and_scales_ignore_the_uniform_scale() -> Result<(), anyhow::Error> {
    let space = SourceSpace::new(Convention::ZBack, 10.0)?;
    assert_eq!(space.euler(Vec3::new(0.1, 0.2, 0.3)), Vec3::new(0.1, 0.3, -0.2));
    // per-axis magnitudes swap without the sign flip
    assert_eq!(space.scale_triple(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 3.0, 2.0));
    Ok(())
}

#[test]
fn position_buffers_remap_in_one_pass() -> Result<(), anyhow::Error> {
    let space = SourceSpace::new(Convention::ZBack, 1.0)?;
    let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    space.positions_in_place(&mut data);
    // the trailing partial triple stays as-is
    assert_eq!(data, vec![1.0, 3.0, -2.0, 4.0, 6.0, -5.0, 7.0]);

    let identity = SourceSpace::new(Convention::Identity, 2.0)?;
    let mut data = vec![2.0, 4.0, 8.0];
    identity.positions_in_place(&mut data);
    assert_eq!(data, vec![1.0, 2.0, 4.0]);
    Ok(())
}

#[test]
fn degenerate_scales_are_rejected() {
    for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let result = SourceSpace::new(Convention::Identity, scale);
        assert!(matches!(result, Err(MaterializeError::Config { .. })));
    }
}

#[test]
fn convention_names_parse() {
    assert_eq!("identity".parse::<Convention>().unwrap(), Convention::Identity);
    assert_eq!("z-back".parse::<Convention>().unwrap(), Convention::ZBack);
    assert!("y-up".parse::<Convention>().is_err());
}
