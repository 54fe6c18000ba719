/// Angular rate source, in degrees per second.
///
/// Reads cannot fail through this trait. Each chip decides what a failed
/// sample turns into; [`Mpu9250`](crate::Mpu9250) reports `0.0`.
pub trait Gyroscope {
    fn rotation_x(&mut self) -> f32;

    fn rotation_y(&mut self) -> f32;

    fn rotation_z(&mut self) -> f32;
}

impl<G> Gyroscope for &mut G
where
    G: Gyroscope + ?Sized,
{
    fn rotation_x(&mut self) -> f32 {
        (**self).rotation_x()
    }

    fn rotation_y(&mut self) -> f32 {
        (**self).rotation_y()
    }

    fn rotation_z(&mut self) -> f32 {
        (**self).rotation_z()
    }
}
