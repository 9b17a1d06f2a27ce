//! Piston kinematics from crank and conrod geometry
pub mod crank_slider;
