pub mod geo_server;
