pub mod mathlens_calculate;
