pub mod api {
    pub mod error;
    pub mod tags;
    pub mod health {
        pub mod routes;
    }
    pub mod product {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
}

pub mod config {
    pub mod app_config;
    pub mod assets_config;
    pub mod cors_config;
    pub mod database_config;
    pub mod server_config;
}

pub mod setup {
    pub mod dependency_injection;
    pub mod server;
}
