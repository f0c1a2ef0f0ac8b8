pub mod application {
    pub mod product {
        pub mod delete;
        pub mod get_all;
        pub mod get_by_id;
        pub mod identify;
        pub mod register;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod config;
        pub mod text;
        pub mod value_objects;
    }
    pub mod product {
        pub mod code_generator;
        pub mod errors;
        pub mod image_validator;
        pub mod model;
        pub mod repository;
        pub mod services;
        pub mod similarity;
        pub mod value_objects;
        pub mod use_cases {
            pub mod delete;
            pub mod get_all;
            pub mod get_by_id;
            pub mod identify;
            pub mod register;
        }
    }
}
