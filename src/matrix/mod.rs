//! Dense sensing ensembles, test-signal generators and matrix property checks.

pub mod ensembles;
pub mod properties;

pub use ensembles::{
    dct_basis, dirac_dct_basis, dirac_hadamard_basis, fourier_basis, gaussian_matrix, hadamard_basis,
    rademacher_matrix, random_orthonormal, sparse_vector,
};
pub use properties::{
    has_orthogonal_columns, has_orthogonal_rows, has_unitary_columns, has_unitary_rows, hermitian,
    is_hermitian, is_positive_definite, is_square, is_symmetric, transpose,
};
