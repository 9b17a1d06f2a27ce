//! Renders the velocity curve through gnuplot.

use crate::zero_dim::squish::SquishResult;
use gnuplot::{AxesCommon, Caption, Color, Figure};

/// Opens a gnuplot window with the labeled velocity-vs-angle curve.
pub fn plot_velocity(result: &SquishResult) {
    let caption = format!(
        "max {:.2} m/s @ {:.2} deg BTDC",
        result.max_velocity, result.max_velocity_angle
    );
    let mut fg = Figure::new();
    fg.axes2d()
        .set_title("Squish velocity", &[])
        .set_x_label("Crankshaft angle [deg BTDC]", &[])
        .set_y_label("Velocity [m/s]", &[])
        .lines(
            result.crank_angle.iter(),
            result.velocity.iter(),
            &[Caption(&caption), Color("red")],
        );
    let _ = fg.show();
}
