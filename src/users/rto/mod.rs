pub mod find_user_rto;
