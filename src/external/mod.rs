pub mod geoapify;
