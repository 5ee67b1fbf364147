//! Operator tests kept out of the implementation files.
