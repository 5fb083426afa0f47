pub mod mathlens_health;
