#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod student_tests;

#[cfg(test)]
mod attendance_tests;

#[cfg(test)]
mod stats_tests;

#[cfg(test)]
mod error_tests;

#[cfg(test)]
mod session_tests;
